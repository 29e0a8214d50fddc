//! # inoscan
//!
//! CLI for the inoscanlib source tree inventory. It scans a C/C++/Arduino
//! project directory, prints a console summary, and optionally writes a
//! structured JSON dump and a self-contained HTML report with charts.
//!
//! ## Usage
//!
//! ```bash
//! # Scan the current directory, write project_report.html
//! inoscan .
//!
//! # Scan with a custom configuration payload
//! inoscan firmware/ --config scan.json
//!
//! # Structured dump for downstream tooling, no HTML
//! inoscan firmware/ --json dump.json --no-html
//! ```

use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use inoscanlib::{scan, summarize, Config};

mod html;
mod json;
mod term;
mod tree;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("inoscan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Heuristic C/C++/Arduino source tree inventory")
        .arg(
            Arg::new("path")
                .help("Project directory to analyze (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("JSON configuration payload (filters, project types, report limits)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .value_name("FILE")
                .help("Write the structured dump (summary + all records) to FILE"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .default_value("project_report.html")
                .help("HTML report path"),
        )
        .arg(
            Arg::new("no-html")
                .long("no-html")
                .action(ArgAction::SetTrue)
                .help("Skip the HTML report"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Suppress the console summary"),
        )
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or(".");

    let config = match matches.get_one::<String>("config") {
        Some(file) => {
            Config::from_file(file).with_context(|| format!("loading config '{file}'"))?
        }
        None => Config::new(),
    };

    let result = scan(path, &config).with_context(|| format!("scanning '{path}'"))?;
    let summary = summarize(&result, &config);

    if !matches.get_flag("quiet") {
        term::print_summary(path, &summary);
    }
    term::print_warnings(&result.warnings);

    if let Some(file) = matches.get_one::<String>("json") {
        let dump = json::render(path, &result, &summary)?;
        fs::write(file, dump).with_context(|| format!("writing JSON dump '{file}'"))?;
        println!("JSON dump written to {file}");
    }

    if !matches.get_flag("no-html") {
        let out = matches
            .get_one::<String>("output")
            .map(String::as_str)
            .unwrap_or("project_report.html");
        let report = html::render(path, &result, &summary)?;
        fs::write(out, report).with_context(|| format!("writing HTML report '{out}'"))?;
        println!("HTML report written to {out}");
    }

    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
