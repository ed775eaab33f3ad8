// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod sink;
pub mod watch;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch as watch_channel;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::engine::{Daemon, DaemonOptions};
use crate::exec::CommandBackend;
use crate::fs::RealFileSystem;
use crate::sink::build_sinks;
use crate::watch::{ChangeDetector, PatternSet};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI overrides)
/// - pattern filter + change detector
/// - sink registry
/// - command backend
/// - Ctrl-C handling and the daemon loop
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config, &args)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let filter = PatternSet::new(&cfg.watch().include, &cfg.watch().exclude)?;
    let detector = ChangeDetector::new(Arc::new(RealFileSystem), &cfg.watch().dir, filter)?;

    let sinks = build_sinks(cfg.sink());
    let backend = CommandBackend::new(cfg.runner().command.clone());

    // Ctrl-C → graceful shutdown.
    let (shutdown_tx, shutdown_rx) = watch_channel::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            return;
        }
        let _ = shutdown_tx.send(true);
    });

    let options = DaemonOptions { once: args.once };
    let interval = Duration::from_secs(cfg.watch().interval_seconds);

    let daemon = Daemon::new(detector, backend, sinks, interval, options);
    daemon.run(shutdown_rx).await?;
    Ok(())
}

/// Simple dry-run output: print the effective settings.
fn print_dry_run(cfg: &ConfigFile) {
    println!("autotest dry-run");
    println!("  watch.dir = {}", cfg.watch().dir);
    println!("  watch.include = {:?}", cfg.watch().include);
    println!("  watch.exclude = {:?}", cfg.watch().exclude);
    println!("  watch.interval_seconds = {}", cfg.watch().interval_seconds);
    println!("  runner.command = {}", cfg.runner().command);
    println!("  sink.sinks = {:?}", cfg.sink().sinks);
    if cfg.sink().sinks.iter().any(|s| s == "file") {
        println!("  sink.file_path = {}", cfg.sink().file_path);
    }
}
