//! # EventHub CLI
//!
//! Thin command line surface over the [`evhub`] facade. Commands write to any
//! [`std::io::Write`] so they can run against an in-memory backend in tests.

pub mod args;

pub use args::{Cli, Command};

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use evhub::Platform;
use evhub::domain::{EntityId, User};
use evhub::plans::GateDecision;
use serde::Serialize;
use std::io::Write;

/// Runs one command against a connected platform.
pub async fn run(platform: &Platform, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Plan { user } => plan(platform, user.as_deref(), out).await,
        Command::Gate { feature_key, usage } => gate(platform, &feature_key, usage, out).await,
        Command::Events { limit } => events(platform, limit, out).await,
        Command::Stats { event_id } => stats(platform, event_id.map(EntityId::from), out).await,
    }
}

async fn plan(platform: &Platform, user_id: Option<&str>, out: &mut impl Write) -> Result<()> {
    let user = match user_id {
        Some(id) => find_user(platform, id).await?,
        None => platform.current_user().await?,
    };
    let plan = platform.plans().resolve(&user).await;
    print_json(out, &plan)
}

async fn find_user(platform: &Platform, id: &str) -> Result<User> {
    platform
        .entities()
        .users()
        .get(id)
        .await
        .with_context(|| format!("Failed to fetch user {id}"))?
        .ok_or_else(|| anyhow!("User {id} not found"))
}

async fn gate(
    platform: &Platform,
    feature_key: &str,
    usage: Option<u64>,
    out: &mut impl Write,
) -> Result<()> {
    let plan = platform.current_plan().await?;
    let decision = GateDecision::evaluate(&plan, feature_key, usage);
    writeln!(out, "{decision}")?;
    Ok(())
}

async fn events(platform: &Platform, limit: usize, out: &mut impl Write) -> Result<()> {
    let events = platform.dashboard().recent_events(limit).await?;
    if events.is_empty() {
        writeln!(out, "No events.")?;
        return Ok(());
    }

    for event in events {
        let id = event.id.as_ref().map_or("-", EntityId::as_str);
        let date = event.date.as_deref().unwrap_or("undated");
        writeln!(out, "{id:<12} {date:<26} {}", event.title)?;
    }
    Ok(())
}

async fn stats(platform: &Platform, event_id: Option<EntityId>, out: &mut impl Write) -> Result<()> {
    match event_id {
        Some(id) => print_json(out, &platform.dashboard().event_stats(&id).await?),
        None => print_json(out, &platform.dashboard().summary(Utc::now()).await?),
    }
}

fn print_json(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
