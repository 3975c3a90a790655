//! Export the GraphQL schema as SDL.
//!
//! Usage: cargo run --bin export-schema [output_path]

use async_graphql::*;
use marketplace_server::graphql::{MutationRoot, QueryRoot};

fn main() -> anyhow::Result<()> {
    let schema = Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .limit_depth(10)
    .limit_complexity(1000)
    .finish();

    let sdl = schema.sdl();

    match std::env::args().nth(1) {
        Some(out_path) => {
            std::fs::write(&out_path, &sdl)?;
            eprintln!("Schema exported to {out_path} ({} bytes)", sdl.len());
        }
        None => print!("{sdl}"),
    }
    Ok(())
}
