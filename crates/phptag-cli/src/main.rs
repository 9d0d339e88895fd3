//! phptag CLI - rewrite PHP echo tags
//!
//! Converts `<?php echo` / `<?php print` to `<?=` and back. Reads one file
//! (or stdin) and writes the rewritten source to stdout.
//!
//! Available fixers:
//! - echo_tag_syntax: Replace `<?php echo` with `<?=` or the reverse
//! - no_short_echo_tag: Deprecated, use echo_tag_syntax with direction long

mod fixer;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use fixer::{build_fixer_config, list_fixers, load_fixer_config, run_fixer, CliOptions};
use phptag_fixer::FixerRegistry;

#[derive(Parser)]
#[command(name = "phptag")]
#[command(version = "0.1.0")]
#[command(about = "Rewrite PHP echo tags between <?= and <?php echo")]
#[command(author = "phptag contributors")]
struct Cli {
    /// File to process, `-` or nothing for stdin
    #[arg(required = false)]
    path: Option<PathBuf>,

    /// Fixer to run
    #[arg(long, short = 'r', value_name = "RULE", default_value = "echo_tag_syntax")]
    rule: String,

    /// Target form: short (<?=) or long (<?php echo)
    #[arg(long, value_name = "DIRECTION")]
    direction: Option<String>,

    /// Keyword used when expanding: echo or print
    #[arg(long, value_name = "FUNCTION")]
    long_function: Option<String>,

    /// Shorten tags even when more statements follow the first one
    #[arg(long)]
    always_short: bool,

    /// Path to a .php-cs-fixer.php file to read rule options from
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Report whether changes would be made without printing the result
    #[arg(long)]
    check: bool,

    /// List available fixers and exit
    #[arg(long)]
    list_fixers: bool,

    /// Show verbose output
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red(), e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let registry = FixerRegistry::new();

    if cli.list_fixers {
        list_fixers(&registry);
        return Ok(ExitCode::SUCCESS);
    }

    let php_config = cli
        .config
        .as_deref()
        .map(load_fixer_config)
        .transpose()?;

    let options = CliOptions {
        direction: cli.direction.clone(),
        long_function: cli.long_function.clone(),
        always_short: cli.always_short,
    };
    let config = build_fixer_config(&cli.rule, php_config.as_ref(), &options);

    let (label, source) = read_input(cli.path.as_ref())?;
    tracing::debug!(input = %label, bytes = source.len(), "input read");

    let (fixed, changes) = run_fixer(&source, &registry, &cli.rule, &config)?;

    if cli.verbose || cli.check {
        let summary = match changes {
            0 => format!("{}: no changes", label).dimmed().to_string(),
            1 => format!("{}: 1 tag rewritten", label).yellow().to_string(),
            n => format!("{}: {} tags rewritten", label, n).yellow().to_string(),
        };
        eprintln!("{}", summary);
    }

    if cli.check {
        return Ok(if changes > 0 {
            ExitCode::from(1)
        } else {
            ExitCode::SUCCESS
        });
    }

    io::stdout()
        .write_all(fixed.as_bytes())
        .context("Failed to write output")?;

    Ok(ExitCode::SUCCESS)
}

/// Read the source from a file, or from stdin for `-` or no path
fn read_input(path: Option<&PathBuf>) -> Result<(String, String)> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok((path.display().to_string(), source))
        }
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read stdin")?;
            Ok(("<stdin>".to_string(), source))
        }
    }
}
