mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::debug;
use std::process;

use amortize_core::loan::NumberFormat;
use commands::loan::{InterestArgs, LoanArgs};

/// Fixed-rate loan amortization schedules
#[derive(Parser)]
#[command(
    name = "amortize",
    version,
    about = "Fixed-rate loan amortization schedules",
    long_about = "Computes the level monthly payment, total interest and a full \
                  month-by-month amortization schedule for a fixed-rate loan. \
                  Inputs are validated field by field and every problem is reported."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Digit grouping character for formatted amounts
    #[arg(long, default_value_t = ',', global = true)]
    thousands_separator: char,

    /// Disable digit grouping
    #[arg(long, global = true, conflicts_with = "thousands_separator")]
    no_grouping: bool,

    /// Decimal point character for formatted amounts
    #[arg(long, default_value_t = '.', global = true)]
    decimal_point: char,
}

impl Cli {
    fn number_format(&self) -> NumberFormat {
        NumberFormat {
            decimal_point: self.decimal_point,
            thousands_separator: (!self.no_grouping).then_some(self.thousands_separator),
            ..NumberFormat::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Loan summary and full amortization schedule
    Schedule(LoanArgs),
    /// Loan summary only (monthly payment, totals)
    Payment(LoanArgs),
    /// Cumulative interest paid through a given month
    Interest(InterestArgs),
    /// Check a loan request and list every problem with it
    Validate(LoanArgs),
    /// Schedule for a $500,000 loan at 5% over 30 years
    Example,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let fmt = cli.number_format();
    debug!("output format {:?}, number format {:?}", cli.output, fmt);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::loan::run_schedule(args, &fmt),
        Commands::Payment(args) => commands::loan::run_payment(args, &fmt),
        Commands::Interest(args) => commands::loan::run_interest(args, &fmt),
        Commands::Validate(args) => commands::loan::run_validate(args),
        Commands::Example => commands::loan::run_example(&fmt),
        Commands::Version => {
            println!("amortize {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            if output::has_messages(&value) {
                process::exit(1);
            }
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
