//! buildsyntax-dump - Tokenize and parse a build file and print its AST.
//!
//! A small inspection tool, not a build tool: it has no opinion about
//! BUILD-rule semantics, it just runs the crate's own `tokenize`/`parse`
//! pipeline over a file (or stdin) and reports the result.
//!
//! # Usage
//!
//! ```bash
//! # Parse a file and print the AST
//! buildsyntax-dump BUILD.bazel
//!
//! # Parse stdin
//! cat BUILD | buildsyntax-dump -
//!
//! # Emit JSON instead of the debug representation (requires `serde`)
//! buildsyntax-dump --json BUILD.bazel
//! ```

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use colored::Colorize;

use buildsyntax::parse_source;

/// Tokenize and parse a build file and print its AST.
#[derive(ClapParser, Debug)]
#[command(name = "buildsyntax-dump")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to parse, or `-` to read from stdin.
    path: PathBuf,

    /// Emit the AST as JSON instead of the debug representation.
    #[arg(long)]
    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    json: bool,

    /// Quiet mode: print only the pass/fail summary line.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(had_errors) => {
            if had_errors {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<bool> {
    let source = read_source(&args.path)?;
    let (root, errors) =
        parse_source(&source).with_context(|| format!("tokenizing {}", args.path.display()))?;

    if !args.quiet {
        print_root(&root, args.json);
    }

    if errors.is_empty() {
        if !args.quiet {
            println!(
                "{} {} statement(s), no errors",
                "ok".green().bold(),
                root.statements.len()
            );
        }
        Ok(false)
    } else {
        for err in &errors {
            eprintln!("{} {err}", "error:".red().bold());
        }
        eprintln!(
            "{} {} error(s) recorded; this file should not be round-tripped",
            "failed:".red().bold(),
            errors.len()
        );
        Ok(true)
    }
}

fn read_source(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

#[cfg(feature = "serde")]
fn print_root(root: &buildsyntax::ast::Root, json: bool) {
    if json {
        match serde_json::to_string_pretty(root) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("{} failed to serialize AST: {e}", "error:".red().bold()),
        }
    } else {
        println!("{root:#?}");
    }
}

#[cfg(not(feature = "serde"))]
fn print_root(root: &buildsyntax::ast::Root, _json: bool) {
    println!("{root:#?}");
}
