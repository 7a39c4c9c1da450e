//! Interactive calculator session: key handling, display state and history.

mod history;
mod key;
mod state;

pub use history::{HistoryEntry, HistoryLedger};
pub use key::{Key, KeyParseError, Operator, UnaryFunction, parse_keys};
pub use state::{Calculator, CalculatorState, ERROR_DISPLAY, Mode};
