use clap::{Parser, Subcommand, ValueEnum};

use std::process;

mod cmd;
mod config;
mod entity;
mod error;
mod exchange;
mod filter;
mod ledger;
mod resource;
mod service;
mod util;
mod xdg;

pub type CliResult<T> = Result<T, error::CliError>;

#[macro_export]
macro_rules! wout {
    ($($arg:tt)*) => ({
        use std::io::Write;
        (writeln!(&mut ::std::io::stdout(), $($arg)*)).unwrap();
    });
}

#[macro_export]
macro_rules! werr {
    ($($arg:tt)*) => ({
        use std::io::Write;
        (writeln!(&mut ::std::io::stderr(), $($arg)*)).unwrap();
    });
}

/// Kind of record stored in each file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Expenses,
    Budgets,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Copy the default configuration file to the default location
    Configure(cmd::configure::Args),
    /// Create the expenses and budgets files
    Create(cmd::create::Args),
    /// Record an expense, in any supported currency
    Expense(cmd::expense::Args),
    /// Set the spending limit of a month
    Budget(cmd::budget::Args),
    /// Display all expenses
    Show(cmd::show::Args),
    /// Display the budget status and the spending per category
    Status(cmd::status::Args),
    /// Display the current exchange rates
    Rates(cmd::rates::Args),
    /// Convert an amount between currencies with the current rates
    Convert(cmd::convert::Args),
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().filter_or("SPENDWISE_LOG", "warn"));

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Configure(args) => cmd::configure::run(args),
        Command::Create(args) => cmd::create::run(args),
        Command::Expense(args) => cmd::expense::run(args),
        Command::Budget(args) => cmd::budget::run(args),
        Command::Show(args) => cmd::show::run(args),
        Command::Status(args) => cmd::status::run(args),
        Command::Rates(args) => cmd::rates::run(args),
        Command::Convert(args) => cmd::convert::run(args),
    };

    if let Err(err) = result {
        werr!("{}", err);
        process::exit(1);
    }
}
