//! Command-line argument parsing and help for dirscope.
//!
//! When invoked with no args/flags (ds), dirscope opens the configured storage root.

use crate::config::Config;
use crate::core::sort::SortKey;
use crate::utils::parse_since;

use std::time::SystemTime;

/// Options for a browsing run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliOptions {
    pub path: Option<String>,
    pub sort: SortKey,
    pub since: Option<SystemTime>,
    pub updated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    Run(CliOptions),
    /// Help or version was printed.
    Exit,
    /// Bad arguments, the error was already printed.
    Invalid,
}

/// Parses the process arguments, printing help or errors where needed.
pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(&args)
}

/// Parses arguments (without the program name).
pub fn parse_args(args: &[String]) -> CliAction {
    let mut opts = CliOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                print_version();
                return CliAction::Exit;
            }
            "-h" | "--help" => {
                print_help();
                return CliAction::Exit;
            }
            "--updated" | "-u" => opts.updated = true,
            "--sort" | "-s" => {
                let Some(value) = iter.next() else {
                    eprintln!("Error: --sort needs a value");
                    return CliAction::Invalid;
                };
                match value.parse::<SortKey>() {
                    Ok(key) => opts.sort = key,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        return CliAction::Invalid;
                    }
                }
            }
            "--since" => {
                let Some(value) = iter.next() else {
                    eprintln!("Error: --since needs an RFC 3339 timestamp");
                    return CliAction::Invalid;
                };
                match parse_since(value) {
                    Ok(time) => opts.since = Some(time),
                    Err(e) => {
                        eprintln!("Error: invalid --since '{}': {}", value, e);
                        return CliAction::Invalid;
                    }
                }
            }
            arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
                if opts.path.is_some() {
                    eprintln!("Error: dirscope accepts only one path.");
                    eprintln!("Usage: ds [OPTIONS] [PATH]");
                    return CliAction::Invalid;
                }
                opts.path = Some(arg.to_string());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                eprintln!("Try --help for available options");
                return CliAction::Invalid;
            }
        }
    }
    CliAction::Run(opts)
}

fn print_version() {
    println!("dirscope {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"dirscope - A read-only directory browser

USAGE:
  ds [OPTIONS] [PATH]

PATH:
  Storage root to open (defaults to general.root, then the home directory)

OPTIONS:
  -s, --sort <KEY>        Initial sort: name-asc, name-desc, size-asc, size-desc,
                          date-asc, date-desc, ext-asc, ext-desc (or 0-7)
  -u, --updated           Start in the updated-files view
      --since <TIME>      Reference point of the updated-files view (RFC 3339)
  -h, --help              Print help information
  -v, --version           Display the current installed version of dirscope

COMMANDS (one per line on stdin):
{}
ENVIRONMENT:
  DIRSCOPE_CONFIG         Override the default config path ({})
"#,
        COMMANDS_TEXT,
        Config::default_path().display()
    );
}

pub const COMMANDS_TEXT: &str = r#"  ls                      Print the current listing
  cd <NAME>               Enter a folder of the listing
  back                    Go back, exits at the start directory
  sort <KEY|0-7>          Re-order the listing
  toggle                  Switch between all files and updated files
  pwd                     Print the current directory
  help                    Show this list
  quit                    Leave
"#;
