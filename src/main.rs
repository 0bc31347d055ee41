//! agentsh front-end CLI.
//!
//! Reads a script, prints its canonical rendering and reports every lexical
//! and syntax error with a source excerpt.
//!
//! # Examples
//!
//! ```text
//! agentsh pipeline.ash
//! agentsh pipeline.ash --tokens
//! RUST_LOG=debug agentsh pipeline.ash --quiet
//! ```

use std::{fs::read_to_string, path::PathBuf, process, time::Instant};

use agentsh::{errors::errors::Diagnostics, parse, render_error, tokenize};
use clap::Parser;
use log::info;

#[derive(Parser)]
#[command(name = "agentsh")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Parse and check agentsh scripts", long_about = None)]
struct Cli {
    /// Script to parse
    file: PathBuf,

    /// Print the token stream instead of the parsed program
    #[arg(long)]
    tokens: bool,

    /// Only report diagnostics
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("error: cannot read {}: {}", cli.file.display(), error);
            process::exit(2);
        }
    };

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.display().to_string());

    let diagnostics = if cli.tokens {
        let start = Instant::now();
        let (tokens, diagnostics) = tokenize(&source);
        info!("tokenized {} tokens in {:?}", tokens.len(), start.elapsed());

        if !cli.quiet {
            for token in &tokens {
                println!("{}", token.debug());
            }
        }
        diagnostics
    } else {
        let start = Instant::now();
        let (program, diagnostics) = parse(&source);
        info!(
            "parsed {} statements in {:?}",
            program.statements.len(),
            start.elapsed()
        );

        if !cli.quiet && diagnostics.is_empty() {
            println!("{}", program);
        }
        diagnostics
    };

    report(&diagnostics, &source, &file_name);
}

fn report(diagnostics: &Diagnostics, source: &str, file_name: &str) {
    if diagnostics.is_empty() {
        return;
    }

    for error in diagnostics {
        eprintln!("{}\n", render_error(error, source, file_name));
    }
    eprintln!("{} error(s) in {}", diagnostics.len(), file_name);

    process::exit(1);
}
