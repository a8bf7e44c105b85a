use crate::parsing::arg_parse;
use clap::Parser;
use color_eyre::eyre::{bail, Result, WrapErr};
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub mod convert;
pub mod matcher;
mod parsing;

pub use convert::{convert_file, load_records, Record};
pub use matcher::{check_qualify, check_qualify_with, MatchOptions, MatchStatus, Qualification};

pub const DEFAULT_INPUT: &str = "app.csv";
pub const DEFAULT_OUTPUT: &str = "app.json";
pub const PROMPT: &str = "Enter codes separated by commas (e.g., 3C,3G,3B,3D,3A,3F,3E,3K): ";

#[derive(Parser, Debug)]
#[clap(name = "CsvQualify")]
#[clap(version = "0.1")]
#[clap(
    about = "Converts a csv file to json and looks up the Option matching a set of codes",
    long_about = None
)]
pub struct ApplicationOptions {
    /// CSV file to convert, first row is the header
    #[clap(long, short, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// JSON file to write (or to read with --from-json)
    #[clap(long, short, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Comma separated codes to look up. Prompted for on stdin if missing
    #[clap(long, short)]
    pub codes: Option<String>,

    /// Skip the conversion and look up codes in an existing JSON file
    #[clap(long)]
    pub from_json: bool,

    /// Compare codes case-insensitively
    #[clap(long)]
    pub ignore_case: bool,

    /// Print the whole matching row after a match
    #[clap(long)]
    pub show_mapping: bool,
}

/// Prompts on `out` and reads one line of codes from `input`.
pub fn read_codes<R: BufRead, W: Write>(mut input: R, mut out: W) -> Result<String> {
    write!(out, "{}", PROMPT)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).wrap_err("failed to read codes")? == 0 {
        bail!("no codes given on standard input");
    }
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

pub fn report<W: Write>(qualification: &Qualification, show_mapping: bool, mut out: W) -> Result<()> {
    writeln!(out, "{}", qualification)?;
    if let Some(record) = qualification.record().filter(|_| show_mapping) {
        writeln!(out, "Mapping:")?;
        convert::write_pretty(record, &mut out)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Runs conversion and lookup, reading codes from `input` when none were
/// passed on the command line.
pub fn run_with_io<R: BufRead, W: Write>(
    options: &ApplicationOptions,
    input: R,
    mut out: W,
) -> Result<()> {
    let records = if options.from_json {
        load_records(&options.output)?
    } else {
        let records = convert_file(&options.input, &options.output)?;
        writeln!(
            out,
            "CSV converted to JSON and saved as {}",
            options.output.display()
        )?;
        records
    };

    let codes = match &options.codes {
        Some(codes) => codes.clone(),
        None => read_codes(input, &mut out)?,
    };

    let match_options = MatchOptions {
        ignore_case: options.ignore_case,
    };
    let qualification = check_qualify_with(&codes, &records, match_options);
    info!(
        "Lookup of {:?} over {} rows: {}",
        codes,
        records.len(),
        qualification.status()
    );

    report(&qualification, options.show_mapping, &mut out)
}

pub fn run_by_option(options: &ApplicationOptions) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with_io(options, stdin.lock(), stdout.lock())
}

pub fn run() -> Result<()> {
    let options: ApplicationOptions = arg_parse();
    run_by_option(&options)
}
