// routegraph_builder: CLI front-end that runs the ingest pipeline and writes a graph file
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

//! `graphmaker`: walks a directory of per-system descriptor files and writes a serialized
//! graph file a `route-finder` or `route-server` can load.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;
use routegraph::record::GraphFile;

/// Builds a serialized routegraph graph file from a tree of system descriptors.
#[derive(Parser, Debug)]
#[command(name = "graphmaker", author, version, about)]
struct Args {
    /// Root directory containing region/constellation/system descriptor trees.
    #[arg(long)]
    source_dir: PathBuf,
    /// Directory containing the tag-list files (trig-final-lim.txt and friends).
    #[arg(long)]
    data_dir: PathBuf,
    /// Where to write the serialized graph file.
    #[arg(long)]
    out_file: PathBuf,
    /// Number of ingest worker threads.
    #[arg(long, default_value_t = 20)]
    concurrency: usize,
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    info!("ingesting systems from {}", args.source_dir.display());
    let records = routegraph_ingest::ingest(&args.source_dir, &args.data_dir, args.concurrency)?;
    info!("ingested {} systems", records.len());

    // Validate the graph is well-formed (no dangling destinations, no duplicate names) before
    // writing anything out.
    routegraph::builder::GraphBuilder::new()
        .build(records.clone())
        .map_err(|e| format!("built graph is invalid: {e}"))?;

    let file = GraphFile { system_data: records };
    routegraph::io::save(&args.out_file, &file)?;
    info!("wrote {}", args.out_file.display());
    Ok(())
}
