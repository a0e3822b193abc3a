// routegraph_server: HTTP front-end serving route queries against a graph file
// Licensed under the MIT license or the Apache License, Version 2.0, at your option.

//! `route-server`: serves route queries over HTTP against a serialized graph, held in memory
//! for the lifetime of the process.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use log::info;
use routegraph::builder::{BuiltGraph, GraphBuilder};
use routegraph::engine::RouteEngine;
use routegraph::ids::{NodeId, TagId};
use routegraph::record::SystemRecord;
use routegraph::RouteError;
use serde::{Deserialize, Serialize};

/// Serves route queries over HTTP against a serialized routegraph graph file.
#[derive(Parser, Debug)]
#[command(name = "route-server", author, version, about)]
struct Args {
    /// Path to the serialized graph file.
    graph_file: PathBuf,
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    listen: SocketAddr,
}

struct AppState {
    built: BuiltGraph,
    engine: RouteEngine,
    /// Full system records, indexed by `NodeId::index()` (the builder assigns dense ids in
    /// input order, so this lines up with `built` without needing a second lookup table).
    records: Vec<SystemRecord>,
}

#[derive(Debug, Deserialize)]
struct RouteRequest {
    from_systems: Vec<String>,
    #[serde(default)]
    to_system: String,
    #[serde(default)]
    to_tag: String,
    #[serde(default)]
    avoid_systems: Vec<String>,
    #[serde(default)]
    avoid_tags: Vec<String>,
    #[serde(default)]
    prefer_not_tags: Vec<String>,
}

#[derive(Debug, Default, Serialize)]
struct RouteResponse {
    #[serde(rename = "Error")]
    error: String,
    #[serde(rename = "Routes")]
    routes: Vec<Vec<SystemRecord>>,
}

#[derive(Debug, Default, Serialize)]
struct ListResponse {
    #[serde(rename = "Error")]
    error: String,
    #[serde(rename = "Items")]
    items: Vec<String>,
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let file = routegraph::io::load(&args.graph_file).expect("could not load system data");
    let records = file.system_data.clone();
    let built = GraphBuilder::new().build(file.system_data).expect("could not populate data");
    let engine = RouteEngine::new(built.graph.clone());
    let state = Arc::new(AppState { built, engine, records });

    let app = Router::new()
        .route("/get_routes", post(handle_get_routes))
        .route("/list_tags", get(handle_list_tags))
        .route("/list_systems", get(handle_list_systems))
        .with_state(state);

    info!("listening on {}", args.listen);
    let listener = tokio::net::TcpListener::bind(args.listen).await.expect("could not bind listener");
    axum::serve(listener, app).await.expect("server error");
}

async fn handle_get_routes(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RouteRequest>,
) -> (StatusCode, Json<RouteResponse>) {
    if req.from_systems.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "must specify at least one source system");
    }
    if !req.to_system.is_empty() && !req.to_tag.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "cannot provide both target system and tag");
    }
    if req.to_system.is_empty() && req.to_tag.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "must provide either target system or tag");
    }

    let sources = match resolve_systems(&state.built, &req.from_systems) {
        Ok(v) => v,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e),
    };
    let avoid_nodes = match resolve_systems(&state.built, &req.avoid_systems) {
        Ok(v) => v,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e),
    };
    let hard_avoid_tags = match resolve_tags(&state.built, &req.avoid_tags) {
        Ok(v) => v,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e),
    };
    let soft_avoid_tags = match resolve_tags(&state.built, &req.prefer_not_tags) {
        Ok(v) => v,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e),
    };

    let result = if !req.to_system.is_empty() {
        match state.built.systems.get(&req.to_system) {
            Some(&end) => state.engine.find_routes_to_node(
                &sources,
                end,
                &avoid_nodes,
                &hard_avoid_tags,
                &soft_avoid_tags,
            ),
            None => return error_response(StatusCode::BAD_REQUEST, "unknown target system"),
        }
    } else {
        match state.built.tags.get(&req.to_tag) {
            Some(&end_tag) => state.engine.find_routes_to_tag(
                &sources,
                end_tag,
                &avoid_nodes,
                &hard_avoid_tags,
                &soft_avoid_tags,
            ),
            None => return error_response(StatusCode::BAD_REQUEST, "unknown target tag"),
        }
    };

    let routes = match result {
        Ok(routes) => routes,
        Err(RouteError::NoRoute) => {
            return error_response(StatusCode::NOT_FOUND, "could not find a viable route");
        }
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    };

    let nice_routes = routes
        .iter()
        .map(|route| route.iter().map(|id| state.records[id.index()].clone()).collect())
        .collect();

    (StatusCode::OK, Json(RouteResponse { error: String::new(), routes: nice_routes }))
}

async fn handle_list_tags(State(state): State<Arc<AppState>>) -> Json<ListResponse> {
    Json(ListResponse { error: String::new(), items: state.built.tag_names.clone() })
}

async fn handle_list_systems(State(state): State<Arc<AppState>>) -> Json<ListResponse> {
    Json(ListResponse { error: String::new(), items: state.built.system_names.clone() })
}

fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<RouteResponse>) {
    (status, Json(RouteResponse { error: message.to_string(), routes: Vec::new() }))
}

fn resolve_systems(built: &BuiltGraph, names: &[String]) -> Result<Vec<NodeId>, String> {
    names
        .iter()
        .map(|n| built.systems.get(n).copied().ok_or_else(|| format!("unknown system {n:?}")))
        .collect()
}

fn resolve_tags(built: &BuiltGraph, names: &[String]) -> Result<Vec<TagId>, String> {
    names
        .iter()
        .map(|n| built.tags.get(n).copied().ok_or_else(|| format!("unknown tag {n:?}")))
        .collect()
}
