//! ldp-builder - Load distribution fragment of a gateway configuration
//!
//! This is the composition root that wires together all the components.

use ldp_builder::adapters::inbound::BuildSnapshot;
use ldp_builder::application::{BuildContext, ConfigBuilder};
use ldp_builder::config::load_config;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging (stdout carries the document)
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        "starting ldp-builder gateway={} snapshot={}",
        cfg.gateway_name,
        cfg.snapshot_path
    );

    // 1. Read build inputs
    let parts = BuildSnapshot::from_file(&cfg.snapshot_path)?.into_parts();
    tracing::info!(
        backends = parts.backend_ids.len(),
        policies = parts.policy_store.len(),
        "snapshot loaded"
    );

    // 2. Run one build
    let context =
        BuildContext::new(parts.backend_ids).with_watch_namespaces(cfg.watch_namespaces.clone());
    let mut builder = ConfigBuilder::new(
        context,
        cfg.gateway_identifier(),
        Arc::new(parts.policy_store),
        Arc::new(parts.port_resolver),
    );
    builder.load_distribution_policy();

    // 3. Emit the document
    let gateway = builder.build();
    println!("{}", serde_json::to_string_pretty(&gateway)?);

    Ok(())
}
