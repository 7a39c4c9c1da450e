use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use zcalc::calculator::{copy_to_clipboard, evaluate_expression};
use zcalc::config::Config;
use zcalc::session::{Calculator, CalculatorState, HistoryLedger, Key, parse_keys};

#[derive(Parser, Debug)]
#[command(name = "zcalc", version, about = "Keystroke-driven arithmetic calculator")]
struct Cli {
    /// Path to a config file (defaults to the user config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one expression, e.g. `2×(3+4)` or `√(9)+2²`.
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,
        /// Copy the result to the clipboard.
        #[arg(long)]
        copy: bool,
    },
    /// Replay key presses and print the resulting state.
    Keys {
        #[arg(required = true, allow_hyphen_values = true)]
        keys: Vec<String>,
        /// Print a JSON snapshot instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Interactive session reading key presses from stdin (the default).
    Repl,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    state: &'a CalculatorState,
    history: &'a HistoryLedger,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.log_level);

    match cli.command.unwrap_or(Command::Repl) {
        Command::Eval { expression, copy } => run_eval(&expression, copy || config.copy_on_equals),
        Command::Keys { keys, json } => run_keys(&keys, json, &config),
        Command::Repl => run_repl(&config),
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_eval(expression: &str, copy: bool) -> Result<ExitCode> {
    let result = evaluate_expression(expression);
    println!("{}", result.display());

    if let Some(err) = result.error() {
        eprintln!("{}: {err}", result.expression());
        return Ok(ExitCode::FAILURE);
    }
    if copy {
        copy_to_clipboard(result.display())?;
    }
    Ok(ExitCode::SUCCESS)
}

fn run_keys(words: &[String], json: bool, config: &Config) -> Result<ExitCode> {
    let mut calc = Calculator::new();
    for word in words {
        let keys = parse_keys(word)?;
        for key in keys {
            press(&mut calc, key, config);
        }
    }

    if json {
        let snapshot = Snapshot {
            state: calc.state(),
            history: calc.history(),
        };
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_state(calc.state());
        print_history(calc.history(), config.history_display_limit);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_repl(config: &Config) -> Result<ExitCode> {
    let mut calc = Calculator::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print_state(calc.state());
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let line = line.trim();

        if let Some(command) = line.strip_prefix(':') {
            if !run_command(&mut calc, command, config) {
                break;
            }
        } else {
            match parse_keys(line) {
                Ok(keys) => {
                    for key in keys {
                        press(&mut calc, key, config);
                    }
                }
                Err(err) => eprintln!("{err}"),
            }
        }

        print_state(calc.state());
        stdout.flush().context("Failed to flush stdout")?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Handle a `:command` line. Returns `false` when the session should end.
fn run_command(calc: &mut Calculator, command: &str, config: &Config) -> bool {
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("quit" | "q"), _) => return false,
        (Some("history"), _) => print_history(calc.history(), config.history_display_limit),
        (Some("clear-history"), _) => calc.clear_history(),
        (Some("recall"), Some(n)) => {
            // 1 is the most recent entry
            let index = n
                .parse::<usize>()
                .ok()
                .and_then(|n| calc.history().len().checked_sub(n));
            if index.and_then(|i| calc.select_history(i)).is_none() {
                eprintln!("no history entry {n}");
            }
        }
        _ => eprintln!("unknown command: :{command}"),
    }
    true
}

fn press(calc: &mut Calculator, key: Key, config: &Config) {
    let recorded = calc.history().len();
    calc.on_key(key);

    if key == Key::Equals
        && config.copy_on_equals
        && calc.history().len() > recorded
        && let Err(err) = copy_to_clipboard(&calc.state().display)
    {
        tracing::warn!("{err:#}");
    }
}

fn print_state(state: &CalculatorState) {
    println!("  {}", state.expression);
    println!("= {}", state.display);
}

fn print_history(history: &HistoryLedger, limit: usize) {
    if history.is_empty() {
        println!("No calculation history");
        return;
    }
    for (n, entry) in history.recent(limit).enumerate() {
        println!("{:>3}. {} = {}", n + 1, entry.expression, entry.result);
    }
}
