use std::io::{self, BufRead, Read};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use watchdsl_parser::{diagnostics::Diagnostic, lex_and_parse, lexer::tokenize};

// ANSI color codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

#[derive(Parser)]
#[command(name = "watchdsl")]
#[command(about = "Parse and inspect event-monitoring rules", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a rule and print its syntax tree
    Parse {
        /// Rule text, or `-` to read it from stdin
        rule: String,
    },

    /// Print the tokens of a rule with their positions
    Tokens {
        /// Rule text, or `-` to read it from stdin
        rule: String,
    },

    /// Print a rule in canonical form
    Fmt {
        /// Rule text, or `-` to read it from stdin
        rule: String,
    },

    /// Check rules read from stdin, one per line
    Check,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Parse { rule } => read_rule(rule).map(|src| parse_and_print(&src)),
        Commands::Tokens { rule } => read_rule(rule).map(|src| print_tokens(&src)),
        Commands::Fmt { rule } => read_rule(rule).map(|src| format_rule(&src)),
        Commands::Check => check_lines(),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{}{}error:{} {}", BOLD, RED, RESET, err);
            ExitCode::FAILURE
        }
    }
}

fn read_rule(rule: String) -> io::Result<String> {
    if rule != "-" {
        return Ok(rule);
    }
    let mut src = String::new();
    io::stdin().read_to_string(&mut src)?;
    Ok(src)
}

fn parse_and_print(src: &str) -> bool {
    match lex_and_parse(src) {
        Ok(program) => {
            println!("{:#?}", program);
            true
        }
        Err(diagnostic) => {
            report(src, &diagnostic);
            false
        }
    }
}

fn print_tokens(src: &str) -> bool {
    match tokenize(src) {
        Ok(tokens) => {
            for token in tokens {
                println!("{}:{}\t{}\t{}", token.line, token.column, token.kind, token);
            }
            true
        }
        Err(diagnostic) => {
            report(src, &diagnostic);
            false
        }
    }
}

fn format_rule(src: &str) -> bool {
    match lex_and_parse(src) {
        Ok(program) => {
            println!("{}", program);
            true
        }
        Err(diagnostic) => {
            report(src, &diagnostic);
            false
        }
    }
}

fn check_lines() -> io::Result<bool> {
    let mut all_valid = true;
    for (index, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match lex_and_parse(&line) {
            Ok(program) => {
                debug!(line = index + 1, statements = program.len(), "rule accepted");
                println!("{}{}: ok{}", GREEN, index + 1, RESET);
            }
            Err(diagnostic) => {
                all_valid = false;
                println!("{}{}: {}{}", YELLOW, index + 1, diagnostic, RESET);
            }
        }
    }
    Ok(all_valid)
}

fn report(src: &str, diagnostic: &Diagnostic) {
    if let Err(err) = diagnostic.eprint(src) {
        warn!(%err, "could not render diagnostic");
        eprintln!("{}", diagnostic);
    }
}
