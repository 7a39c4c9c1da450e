//! Keystroke-driven arithmetic calculator.
//!
//! [`calculator`] turns expression text into formatted results; [`session`]
//! tracks what the user is typing and keeps the result history.

pub mod calculator;
pub mod config;
pub mod session;
