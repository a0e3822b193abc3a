// routegraph_query: CLI front-end that runs a single route query against a graph file
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

//! `route-finder`: loads a serialized graph and prints the routes for a single query.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use routegraph::builder::{BuiltGraph, GraphBuilder};
use routegraph::engine::RouteEngine;
use routegraph::ids::NodeId;
use routegraph::{Route, RouteError};

/// Finds the shortest route(s) between systems in a serialized routegraph graph file.
#[derive(Parser, Debug)]
#[command(name = "route-finder", author, version, about)]
struct Args {
    /// Path to the serialized graph file.
    graph_file: PathBuf,
    /// Source system name. Repeatable for a multi-source query.
    #[arg(long = "from", required = true)]
    from: Vec<String>,
    /// Target system name. Mutually exclusive with --to-tag.
    #[arg(long = "to", conflicts_with = "to_tag")]
    to: Option<String>,
    /// Target tag name. Mutually exclusive with --to.
    #[arg(long = "to-tag")]
    to_tag: Option<String>,
    /// System name to hard-avoid. Repeatable.
    #[arg(long = "avoid")]
    avoid: Vec<String>,
    /// Tag name to hard-avoid. Repeatable.
    #[arg(long = "avoid-tag")]
    avoid_tag: Vec<String>,
    /// Tag name to soft-avoid (relaxed progressively if no route is found). Repeatable.
    #[arg(long = "prefer-not-tag")]
    prefer_not_tag: Vec<String>,
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
    if args.to.is_none() && args.to_tag.is_none() {
        return Err("must provide either --to or --to-tag".into());
    }

    let file = routegraph::io::load(&args.graph_file)?;
    let built = GraphBuilder::new().build(file.system_data)?;

    let sources = resolve_systems(&built, &args.from)?;
    let avoid_nodes = resolve_systems(&built, &args.avoid)?;
    let hard_avoid_tags = resolve_tags(&built, &args.avoid_tag)?;
    let soft_avoid_tags = resolve_tags(&built, &args.prefer_not_tag)?;

    let engine = RouteEngine::new(built.graph.clone());

    let routes = if let Some(to) = &args.to {
        let end = resolve_system(&built, to)?;
        engine.find_routes_to_node(&sources, end, &avoid_nodes, &hard_avoid_tags, &soft_avoid_tags)
    } else {
        let end_tag = resolve_tag(&built, args.to_tag.as_ref().unwrap())?;
        engine.find_routes_to_tag(&sources, end_tag, &avoid_nodes, &hard_avoid_tags, &soft_avoid_tags)
    };

    let routes = match routes {
        Ok(routes) => routes,
        Err(RouteError::NoRoute) => return Err("could not find a viable route".into()),
        Err(e) => return Err(e.into()),
    };

    for route in &routes {
        println!("{}", render_route(&built, route));
    }

    Ok(())
}

fn render_route(built: &BuiltGraph, route: &Route) -> String {
    route
        .iter()
        .map(|id| {
            let name = &built.system_names[id.index()];
            let sec = &built.sec_status[id.index()];
            let initial = sec.chars().next().unwrap_or('?');
            format!("{name} [{initial}]")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn resolve_system(built: &BuiltGraph, name: &str) -> Result<NodeId, Box<dyn std::error::Error>> {
    built
        .systems
        .get(name)
        .copied()
        .ok_or_else(|| format!("unknown system {name:?}").into())
}

fn resolve_systems(
    built: &BuiltGraph,
    names: &[String],
) -> Result<Vec<NodeId>, Box<dyn std::error::Error>> {
    names.iter().map(|n| resolve_system(built, n)).collect()
}

fn resolve_tag(
    built: &BuiltGraph,
    name: &str,
) -> Result<routegraph::ids::TagId, Box<dyn std::error::Error>> {
    built
        .tags
        .get(name)
        .copied()
        .ok_or_else(|| format!("unknown tag {name:?}").into())
}

fn resolve_tags(
    built: &BuiltGraph,
    names: &[String],
) -> Result<Vec<routegraph::ids::TagId>, Box<dyn std::error::Error>> {
    names.iter().map(|n| resolve_tag(built, n)).collect()
}
