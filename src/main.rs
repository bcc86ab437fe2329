mod debug_report;

use chrono::NaiveDate;
use consulta::{Context, Engine};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let engine = match Engine::from_paths(config.schema.as_deref(), config.aliases.as_deref()) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let ctx = Context { reference_date: config.reference_date };
    let details = engine.resolve_verbose_with(&config.input, &ctx);
    if config.sql_only {
        println!("{}", details.sql());
    } else {
        debug_report::print_run(&details, config.color);
    }
}

struct CliConfig {
    input: String,
    reference_date: Option<NaiveDate>,
    schema: Option<PathBuf>,
    aliases: Option<PathBuf>,
    sql_only: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut reference_date = None;
    let mut schema = None;
    let mut aliases = None;
    let mut sql_only = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("consulta {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--sql-only" => sql_only = true,
            "--reference" => {
                let value = args.next().ok_or_else(|| "error: --reference expects a value".to_string())?;
                reference_date = Some(parse_reference(&value)?);
            }
            "--schema" => {
                let value = args.next().ok_or_else(|| "error: --schema expects a path".to_string())?;
                schema = Some(PathBuf::from(value));
            }
            "--aliases" => {
                let value = args.next().ok_or_else(|| "error: --aliases expects a path".to_string())?;
                aliases = Some(PathBuf::from(value));
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_input(&mut input, value)?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.starts_with("--reference=") => {
                reference_date = Some(parse_reference(arg.trim_start_matches("--reference="))?);
            }
            _ if arg.starts_with("--schema=") => {
                schema = Some(PathBuf::from(arg.trim_start_matches("--schema=")));
            }
            _ if arg.starts_with("--aliases=") => {
                aliases = Some(PathBuf::from(arg.trim_start_matches("--aliases=")));
            }
            _ if arg.starts_with("--input=") => {
                set_input(&mut input, arg.trim_start_matches("--input=").to_string())?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    // Blank input is valid: it resolves to the default listing.
    let input = input.trim_end_matches(['\r', '\n']).to_string();
    Ok(CliConfig { input, reference_date, schema, aliases, sql_only, color })
}

fn set_input(input: &mut Option<String>, value: String) -> Result<(), String> {
    if input.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *input = Some(value);
    Ok(())
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_reference(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("error: invalid --reference '{value}' (expected YYYY-MM-DD)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "consulta {version}

Rule-based natural language to SQL for quote tracking.

Usage:
  consulta [OPTIONS] [--] <text...>
  consulta [OPTIONS] --input <text>

Options:
  -i, --input <text>         Query text. If omitted, reads remaining args
                             or stdin when no args are provided.
  --reference <date>         Render date phrases as literal ranges around
                             this day (YYYY-MM-DD). Default: relative to
                             the database clock.
  --schema <path>            Schema knowledge JSON. Default: built-in.
  --aliases <path>           Alias dictionary JSON. Default: built-in.
  --sql-only                 Print only the resulting SQL.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RUST_LOG                   Log filter for stderr output. Default: warn.

Exit codes:
  0  Success.
  1  Invalid schema or alias configuration.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
