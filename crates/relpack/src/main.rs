//! relpack CLI entry point.

use clap::error::ErrorKind;
use clap::Parser;
use relpack::{logging, ExitCode};
use tracing::{error, info};

/// Manifest-driven release artifact assembler
///
/// Reads zip_structure.json from the current directory, copies the project
/// tree into a disposable scratch workspace, filters and tests the source
/// group, and packages the selected files into a ZIP archive.
#[derive(Parser)]
#[command(name = "relpack", version, about)]
struct Cli {
    /// Output archive filename, resolved relative to the project root
    output: String,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => std::process::exit(0),
                _ => ExitCode::ArgsError.exit(),
            }
        }
    };

    logging::init(cli.verbose, cli.quiet);

    let project_root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            error!("cannot determine project root: {err}");
            ExitCode::IoError.exit();
        }
    };

    match relpack::run(&project_root, &cli.output) {
        Ok(report) => {
            info!(
                "Done: {} ({} entries)",
                report.archive_path.display(),
                report.entry_count
            );
        }
        Err(err) => {
            error!("{err}");
            ExitCode::from(&err).exit();
        }
    }
}
