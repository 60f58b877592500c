use docopt::Docopt;
use env_logger::Env;
use serde::Deserialize;

use libjlp::config::Settings;
use libjlp::parser::Parser;
use libjlp::statement::Statement;
use libjlp::{Encoding, FormatKind};

const USAGE: &str = "
John Lewis Partnership Card Statement Converter

Usage:
  jlp convert <csv> [options]
  jlp summary <csv> [options]
  jlp (-h | --help)
  jlp --version

Options:
  -h --help                 Show this screen.
  --version                 Show version.
  --config=<file>           TOML settings file.
  --format=<format>         Export layout: current, compact or legacy.
  --charset=<charset>       Input encoding: utf-8-sig, utf-8 or latin-1.
  --currency=<code>         Statement currency.
  --bank=<name>             Bank name, also the payee of direct debit repayments.
  --account=<id>            Account identifier.
";

#[derive(Debug, Deserialize)]
struct Args {
    cmd_convert: bool,
    cmd_summary: bool,
    arg_csv: String,
    flag_config: Option<String>,
    flag_format: Option<String>,
    flag_charset: Option<String>,
    flag_currency: Option<String>,
    flag_bank: Option<String>,
    flag_account: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.version(Some(env!("CARGO_PKG_VERSION").to_string())).deserialize())
        .unwrap_or_else(|e| e.exit());

    let settings = load_settings(&args)?;
    let parser = Parser::new(settings);
    let statement = parser.parse_path(&args.arg_csv)?;

    if args.cmd_convert {
        show_statement(&statement)?;
    }

    if args.cmd_summary {
        show_summary(&statement);
    }

    Ok(())
}

fn load_settings(args: &Args) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = match &args.flag_config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    if let Some(format) = &args.flag_format {
        settings.format = format.parse::<FormatKind>()?;
    }
    if let Some(charset) = &args.flag_charset {
        settings.charset = Some(charset.parse::<Encoding>()?);
    }
    if let Some(currency) = &args.flag_currency {
        settings.currency = currency.clone();
    }
    if let Some(bank) = &args.flag_bank {
        settings.bank = bank.clone();
    }
    if let Some(account) = &args.flag_account {
        settings.account = account.clone();
    }

    Ok(settings)
}

fn show_statement(statement: &Statement) -> Result<(), Box<dyn std::error::Error>> {
    let j = serde_json::to_string_pretty(statement)?;
    println!("{}", j);
    Ok(())
}

fn show_summary(statement: &Statement) {
    println!("\n{} Statement\n", statement.bank_id);
    if !statement.account_id.is_empty() {
        println!("Account:          {}", statement.account_id);
    }
    println!("Transactions:     {}", statement.transactions.len());
    println!(
        "Total Debits:     {} {}",
        statement.total_debits(),
        statement.currency
    );
    println!(
        "Total Credits:    {} {}",
        statement.total_credits(),
        statement.currency
    );
    println!(
        "Balance:          {} {}",
        statement.end_balance, statement.currency
    );
    if let (Some(start), Some(end)) = (statement.start_date, statement.end_date) {
        println!("Period:           {} to {}", start, end);
    }

    let mut debits = statement.get_debits();
    debits.sort_by(|a, b| a.amount.cmp(&b.amount));
    println!("\nLargest spends");
    for transaction in debits.iter().take(10) {
        println!(
            "{}    {}    {}",
            transaction.date, &transaction.amount, &transaction.payee
        );
    }
}
