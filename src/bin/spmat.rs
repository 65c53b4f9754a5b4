use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use spmat::config::options::{DEFAULT_FIRST, DEFAULT_RESULTS_DIR, DEFAULT_SECOND};
use spmat::shell::{Operation, Session, run_interactive};
use spmat::ShellOptions;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(about = "Sparse matrix add/subtract/multiply over coordinate-list files")]
struct Cli {
    /// First matrix file
    #[arg(long, default_value = DEFAULT_FIRST)]
    first: PathBuf,

    /// Second matrix file
    #[arg(long, default_value = DEFAULT_SECOND)]
    second: PathBuf,

    /// Directory for result files (created if missing)
    #[arg(long, default_value = DEFAULT_RESULTS_DIR)]
    results_dir: PathBuf,

    /// Run one operation and exit (add, subtract, multiply, all, inspect).
    /// Without it the interactive menu is shown.
    #[arg(long)]
    op: Option<Operation>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let Some(op) = cli.op else {
        let stdin = io::stdin();
        return run_interactive(stdin.lock(), io::stdout(), cli.results_dir)
            .context("interactive session failed");
    };

    let session = Session::new(ShellOptions {
        first: cli.first,
        second: cli.second,
        results_dir: cli.results_dir,
    });
    let report = session
        .run(op)
        .with_context(|| format!("loading {} and {}", session.opts.first.display(), session.opts.second.display()))?;
    print!("{report}");
    if !report.all_succeeded() {
        std::process::exit(1);
    }
    Ok(())
}
