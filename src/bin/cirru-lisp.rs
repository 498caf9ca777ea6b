//! Command-line interface for cirru-lisp
//! Converts Cirru files (or stdin) into parenthesized text, or inspects the
//! intermediate stages.
//!
//! Usage:
//!   cirru-lisp [path] [--format `<format>`] [--config `<file>`] [--separator `<sep>`]
//!   cirru-lisp --list-formats
//!
//! Options come from the built-in defaults, then
//! `$XDG_CONFIG_HOME/cirru-lisp/config.toml` (or `~/.config/...`) when it
//! exists, then `--config`, then `--separator`.

use clap::{Arg, ArgAction, Command};
use cirru_lisp::cirru::config::Loader;
use cirru_lisp::cirru::processor::{
    available_formats, process_source, ProcessingError, ProcessingSpec,
};
use cirru_lisp::Options;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let matches = Command::new("cirru-lisp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Cirru notation into parenthesized Lisp text")
        .arg(
            Arg::new("path")
                .help("Path to the Cirru file (reads stdin when omitted)")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format, see --list-formats")
                .default_value("lisp-compact"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the defaults and the user config file"),
        )
        .arg(
            Arg::new("separator")
                .long("separator")
                .short('s')
                .help("Text placed between top-level expressions"),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let options = load_options(
        matches.get_one::<String>("config").map(String::as_str),
        matches.get_one::<String>("separator").map(String::as_str),
    )
    .unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    });

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("lisp-compact");
    let spec = ProcessingSpec::from_string(format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("\nAvailable formats:");
        for name in available_formats() {
            eprintln!("  {}", name);
        }
        process::exit(1);
    });

    let source = read_source(matches.get_one::<String>("path").map(String::as_str))
        .unwrap_or_else(|e| {
            eprintln!("Error reading input: {}", e);
            process::exit(1);
        });

    handle_convert_command(&source, &spec, &options);
}

fn load_options(config: Option<&str>, separator: Option<&str>) -> Result<Options, ::config::ConfigError> {
    let mut loader = Loader::new().with_user_file();
    if let Some(path) = config {
        loader = loader.with_file(path);
    }
    if let Some(separator) = separator {
        loader = loader.set_override("printer.separator", separator)?;
    }
    loader.build()
}

fn read_source(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => io::read_to_string(io::stdin()),
    }
}

/// Handle the convert command
fn handle_convert_command(source: &str, spec: &ProcessingSpec, options: &Options) {
    match process_source(source, spec, options) {
        Ok(output) => {
            if output.is_empty() || output.ends_with('\n') {
                print!("{}", output);
            } else {
                println!("{}", output);
            }
        }
        Err(ProcessingError::Parse(err)) => {
            eprint!("{}", err.render(source));
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for name in available_formats() {
        println!("  {}", name);
    }
}
