use chrono::NaiveDate;

use crate::{domain::Period, errors::CliError};

pub const USAGE: &str = "Usage: budget_forecast_cli [--plain] [--quiet] <command>\n\
Commands:\n  \
forecast [--period current|next] [--buffer AMOUNT] [--today YYYY-MM-DD] [--json]\n  \
record                     Store today's balance snapshot\n  \
balance <AMOUNT>           Set the current balance and record a snapshot\n  \
period <current|next>      Choose the budget period\n  \
buffer <AMOUNT>            Set the reserve to keep at period end\n  \
history                    List this month's balance snapshots\n  \
backfill <DATE> <BALANCE>  Store an archival snapshot\n  \
clear-history [--yes]      Back up the store, then drop all snapshots\n  \
watch [--interval SECS] [--cycles N]\n  \
version";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Forecast {
        period: Option<Period>,
        buffer: Option<f64>,
        today: Option<NaiveDate>,
        json: bool,
    },
    Record,
    Balance(f64),
    SetPeriod(Period),
    SetBuffer(f64),
    History,
    Backfill {
        date: NaiveDate,
        balance: f64,
    },
    ClearHistory {
        confirmed: bool,
    },
    Watch {
        interval_secs: u64,
        cycles: Option<u32>,
    },
    Version,
    Help,
}

/// Global switches that may precede the command name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalFlags {
    pub plain: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub flags: GlobalFlags,
    pub command: Command,
}

pub fn parse_args<I, S>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into).peekable();
    let mut flags = GlobalFlags::default();
    while let Some(flag) = args.peek() {
        match flag.as_str() {
            "--plain" => flags.plain = true,
            "--quiet" | "-q" => flags.quiet = true,
            _ => break,
        }
        args.next();
    }

    let name = match args.next() {
        Some(name) => name,
        None => {
            return Ok(Invocation {
                flags,
                command: Command::Help,
            })
        }
    };
    let rest: Vec<String> = args.collect();
    let command = match name.as_str() {
        "forecast" => parse_forecast(&rest)?,
        "record" => {
            expect_no_args(&name, &rest)?;
            Command::Record
        }
        "balance" => Command::Balance(parse_amount(single_arg(&name, &rest)?)?),
        "period" => Command::SetPeriod(single_arg(&name, &rest)?.parse()?),
        "buffer" => Command::SetBuffer(parse_amount(single_arg(&name, &rest)?)?),
        "history" => {
            expect_no_args(&name, &rest)?;
            Command::History
        }
        "backfill" => match rest.as_slice() {
            [date, balance] => Command::Backfill {
                date: parse_date(date)?,
                balance: parse_amount(balance)?,
            },
            _ => return Err(CliError::Input("backfill expects <DATE> <BALANCE>".into())),
        },
        "clear-history" => Command::ClearHistory {
            confirmed: rest.iter().any(|arg| arg == "--yes" || arg == "-y"),
        },
        "watch" => parse_watch(&rest)?,
        "version" | "--version" | "-V" => Command::Version,
        "help" | "--help" | "-h" => Command::Help,
        other => return Err(CliError::UnknownCommand(other.to_string())),
    };
    Ok(Invocation { flags, command })
}

fn parse_forecast(args: &[String]) -> Result<Command, CliError> {
    let mut period = None;
    let mut buffer = None;
    let mut today = None;
    let mut json = false;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--period" => period = Some(option_value(arg, iter.next())?.parse()?),
            "--buffer" => buffer = Some(parse_amount(option_value(arg, iter.next())?)?),
            "--today" => today = Some(parse_date(option_value(arg, iter.next())?)?),
            "--json" => json = true,
            other => return Err(CliError::Input(format!("unexpected argument `{other}`"))),
        }
    }
    Ok(Command::Forecast {
        period,
        buffer,
        today,
        json,
    })
}

fn parse_watch(args: &[String]) -> Result<Command, CliError> {
    let mut interval_secs = 5;
    let mut cycles = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let value = option_value(arg, iter.next())?;
        match arg.as_str() {
            "--interval" => {
                interval_secs = value
                    .parse()
                    .map_err(|_| CliError::Input(format!("invalid interval `{value}`")))?
            }
            "--cycles" => {
                cycles = Some(
                    value
                        .parse()
                        .map_err(|_| CliError::Input(format!("invalid cycle count `{value}`")))?,
                )
            }
            other => return Err(CliError::Input(format!("unexpected argument `{other}`"))),
        }
    }
    Ok(Command::Watch {
        interval_secs: interval_secs.max(1),
        cycles,
    })
}

fn option_value<'a>(flag: &str, value: Option<&'a String>) -> Result<&'a str, CliError> {
    value
        .map(String::as_str)
        .ok_or_else(|| CliError::Input(format!("{flag} requires a value")))
}

fn single_arg<'a>(command: &str, args: &'a [String]) -> Result<&'a str, CliError> {
    match args {
        [value] => Ok(value.as_str()),
        _ => Err(CliError::Input(format!("{command} expects exactly one argument"))),
    }
}

fn expect_no_args(command: &str, args: &[String]) -> Result<(), CliError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(CliError::Input(format!("{command} takes no arguments")))
    }
}

/// Accepts `1234.56` and the comma decimal separator `1234,56`.
pub fn parse_amount(raw: &str) -> Result<f64, CliError> {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CliError::Input(format!("invalid amount `{raw}`"))),
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::Input(format!("invalid date `{raw}` (expected YYYY-MM-DD)")))
}
