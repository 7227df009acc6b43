//! Waypoint - landing-route coordinator
//!
//! Usage: `waypoint [ENTRY] [USER_ID] [ROUTE...]`
//!
//! Resolves the landing screen for `ENTRY` (default `/`), signed in as
//! `USER_ID` when given, then enters each `ROUTE` through the gates. Every
//! decision is printed as one JSON line.

use anyhow::{Context, Result};
use waypoint_app::{enter_route, resolve_landing, sign_in, sign_out, AppContext};
use waypoint_infra::{config, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load().context("failed to load configuration")?;

    if !init_tracing(&config.logging) {
        eprintln!("tracing subscriber already installed; keeping it");
    }
    tracing::info!("Waypoint starting...");

    let mut args = std::env::args().skip(1);
    let entry = args.next().unwrap_or_else(|| "/".to_string());
    let user_id = args.next();
    let routes: Vec<String> = args.collect();

    let ctx = AppContext::new(config).context("failed to initialise application context")?;

    match user_id.as_deref() {
        Some(user_id) => sign_in(&ctx, user_id, None)?,
        None => sign_out(&ctx),
    }

    let landing = resolve_landing(&ctx, &entry).await?;
    println!("{}", serde_json::to_string(&landing)?);

    for route in &routes {
        let view = enter_route(&ctx, route).await?;
        println!("{}", serde_json::to_string(&view)?);
    }

    tracing::info!(
        navigations = ctx.navigator.issued().len(),
        "Waypoint finished"
    );
    Ok(())
}
