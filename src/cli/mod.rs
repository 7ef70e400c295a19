use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "linecap",
    version,
    about = "Tees piped input into a file capped to its most recent lines",
    after_help = "EXAMPLES:\n  Keep the last 10 lines of a build log:\n\n    make 2>&1 | linecap -n 10 -o build/error.log"
)]
pub struct Cli {
    /// File to read or follow (default: standard input)
    #[arg(short = 'i', long = "in", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file
    #[arg(short = 'o', long = "out", value_name = "FILE")]
    pub output: PathBuf,

    /// Keep the last NUM lines
    #[arg(short = 'n', long = "lines", value_name = "NUM", default_value_t = 10)]
    pub lines: usize,

    /// File to follow; same as --in
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

pub fn run(cli: Cli) -> Result<()> {
    // --in wins over the positional form when both are given
    let input = cli.input.or(cli.file);
    let config = Config::new(input, cli.output, cli.lines)?;
    crate::tee::run(&config)
}
