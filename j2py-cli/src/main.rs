use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use j2py_core::{ConvertError, Diagnostic, Options, demo, translate_debug, translate_with};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "j2py")]
#[command(about = "j2py - Rewrite simple Java snippets as Python")]
#[command(version)]
struct Cli {
    /// Log each stage to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Java file (or stdin) to Python
    Convert {
        /// The Java source file; reads stdin when omitted
        file: Option<PathBuf>,
        /// Fail if any construct was left verbatim
        #[arg(short, long)]
        strict: bool,
        /// Show the text after every stage
        #[arg(short, long)]
        debug: bool,
    },
    /// Report constructs that would be left verbatim
    Check {
        /// The Java source file; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Convert the built-in Fibonacci example
    Demo,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            file,
            strict,
            debug,
        } => cmd_convert(file.as_deref(), strict, debug),
        Commands::Check { file } => cmd_check(file.as_deref()),
        Commands::Demo => {
            println!("{}", demo::render());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let CliError::Convert(ConvertError::Incomplete { diagnostics, .. }) = &e {
            print_diagnostics(diagnostics);
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| CliError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(buf)
        }
    }
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        eprintln!(
            "  {} line {}: {}",
            format!("[{}]", diag.stage).yellow(),
            diag.line,
            diag.kind
        );
        eprintln!("      {}", diag.snippet.trim().dimmed());
    }
}

fn cmd_convert(file: Option<&Path>, strict: bool, debug: bool) -> Result<(), CliError> {
    let source = read_source(file)?;

    if debug {
        translate_debug(&source).report();
        return Ok(());
    }

    let conversion = translate_with(&source, &Options { strict })?;
    println!("{}", conversion.output);

    if !conversion.diagnostics.is_empty() {
        eprintln!(
            "{} {}",
            "Warning:".yellow().bold(),
            format!(
                "{} construct(s) left verbatim",
                conversion.diagnostics.len()
            )
        );
        print_diagnostics(&conversion.diagnostics);
    }
    Ok(())
}

fn cmd_check(file: Option<&Path>) -> Result<(), CliError> {
    let source = read_source(file)?;
    let conversion = translate_with(&source, &Options::default())?;

    if conversion.is_complete() {
        println!("{}", "✓ Every recognised construct converts".green().bold());
        return Ok(());
    }

    println!(
        "{} {}",
        "Found".bold(),
        format!("{} issue(s)", conversion.diagnostics.len()).red()
    );
    print_diagnostics(&conversion.diagnostics);
    std::process::exit(1);
}
