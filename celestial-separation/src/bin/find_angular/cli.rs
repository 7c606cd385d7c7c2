//! CLI argument definitions for find-angular

use clap::Parser;
use celestial_separation::Strategy;
use std::path::PathBuf;

pub const DEFAULT_CATALOG: &str = "data/tycho-trimmed.csv";

#[derive(Parser, Debug)]
#[command(name = "find-angular")]
#[command(about = "Average, minimum and maximum angular separation between every pair of catalog stars")]
#[command(version)]
pub struct Cli {
    /// Number of threads to use (0 runs the sequential pass)
    #[arg(short = 't', long = "threads", allow_negative_numbers = true)]
    pub threads: Option<i64>,

    /// Catalog file: one "id ra dec" record per line
    #[arg(long, default_value = DEFAULT_CATALOG, allow_hyphen_values = true)]
    pub catalog: PathBuf,

    /// How pairs are split across threads
    #[arg(long, value_enum, default_value_t = Strategy::RowBlock)]
    pub strategy: Strategy,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Options whose next argument is their value.
const VALUE_OPTIONS: &[&str] = &["-t", "--threads", "--catalog", "--strategy"];

/// Accept the single-dash `-help` spelling alongside `-h`/`--help`.
///
/// Only a standalone `-help` is rewritten; as the value of an option (say
/// `--catalog -help`) it is passed through untouched.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut expects_value = false;
    args.into_iter()
        .map(|arg| {
            let arg = if arg == "-help" && !expects_value {
                "--help".to_string()
            } else {
                arg
            };
            expects_value = !expects_value && VALUE_OPTIONS.contains(&arg.as_str());
            arg
        })
        .collect()
}
