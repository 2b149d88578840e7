use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use fragment_core::logging::{self, log_warning};
use std::process::ExitCode;
use tracing::{debug, info};

use crate::engine::{FragmentAssembler, Outcome};
use crate::options::PartialOptions;
use crate::sort::SortMode;

#[derive(Debug, Parser)]
#[command(
    name = "concatfragments",
    author,
    version,
    about = "Assemble a configuration file from a directory of fragments",
    long_about = "Concatenates every file in <WORKDIR>/fragments, in name order, into \
                  <WORKDIR>/fragments.concat and copies the result to the output file. \
                  With --test nothing is copied; the exit status is 0 when the output \
                  file is already up to date and 1 when it would change."
)]
pub struct Cli {
    /// The file to create from the fragments
    #[arg(short, long, value_name = "FILE")]
    outfile: Option<String>,

    /// Directory holding the `fragments` subdirectory
    #[arg(short = 'd', long, value_name = "DIR")]
    workdir: Option<String>,

    /// Order in which fragments are concatenated
    #[arg(long, value_enum, value_name = "MODE")]
    sort: Option<SortMode>,

    /// Sort numerically (same as --sort numeric)
    #[arg(short = 'n', long = "numericalsort", conflicts_with = "sort")]
    numerical_sort: bool,

    /// Add a comment at the top warning that the file is generated
    #[arg(short, long)]
    warn: bool,

    /// Tool named in the warning comment
    #[arg(long, value_name = "NAME")]
    banner_tool: Option<String>,

    /// Create an empty output file when there are no fragments
    #[arg(short, long)]
    force: bool,

    /// Only check whether the output file would change
    #[arg(short, long)]
    test: bool,

    /// Legacy external sort command; ignored
    #[arg(short = 's', long = "sort-command", value_name = "CMD", hide = true)]
    sort_command: Option<String>,

    /// YAML file with default options; flags take precedence
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Append a trace of the run to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Options given on the command line; unset flags stay `None`
    fn to_options(&self) -> PartialOptions {
        let sort = if self.numerical_sort {
            Some(SortMode::Numeric)
        } else {
            self.sort
        };

        PartialOptions {
            outfile: self.outfile.clone(),
            workdir: self.workdir.clone(),
            sort,
            warn: self.warn.then_some(true),
            banner_tool: self.banner_tool.clone(),
            force: self.force.then_some(true),
            test: self.test.then_some(true),
            log_file: self.log_file.clone(),
        }
    }

    /// Config file options with the command line layered on top
    fn gather_options(&self) -> Result<PartialOptions> {
        let base = match &self.config {
            Some(path) => PartialOptions::from_file(shellexpand::tilde(path).into_owned())?,
            None => PartialOptions::default(),
        };
        Ok(base.merge(self.to_options()))
    }
}

/// Parse the command line and run.
///
/// Argument errors end with exit status 1 like every other failure; only
/// `--help` and `--version` exit 0 without running.
pub fn run() -> Result<ExitCode> {
    match Cli::try_parse() {
        Ok(cli) => run_with(cli),
        Err(e) => Ok(report_parse_error(&e)),
    }
}

fn report_parse_error(err: &clap::Error) -> ExitCode {
    if let Err(io_err) = err.print() {
        eprintln!("{}", io_err);
    }
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

pub fn run_with(cli: Cli) -> Result<ExitCode> {
    let options = cli.gather_options()?;

    // Initialize logger
    let log_file = options.log_file_path();
    logging::init_logging(cli.verbose, log_file.as_deref());
    debug!("--START-- {:?}", cli);

    if let Some(command) = &cli.sort_command {
        log_warning(&format!("--sort-command is deprecated and ignored ({})", command));
    }

    let outcome = FragmentAssembler::new(options.resolve()?).run()?;
    match outcome {
        Outcome::Published => info!("Output file updated"),
        Outcome::Identical => debug!("Files identical"),
        Outcome::Differs | Outcome::TargetMissing => debug!("Files differ"),
    }

    Ok(outcome.into())
}
