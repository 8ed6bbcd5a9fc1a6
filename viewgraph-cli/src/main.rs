//! viewgraph: render entities through validated projection types.
//!
//! Usage:
//!   viewgraph --schema views.toml --entities village.json --root v1 --view VillageMicro
//!   viewgraph --schema views.toml --check
//!
//! A schema with a cyclic field-expansion graph is rejected before anything
//! is rendered, and the process exits non-zero.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use viewgraph_cli::{run, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let output = run(&args)?;
    println!("{output}");
    Ok(())
}
