//! # panestack
//!
//! Runs a JSON-lines command script against one window stack and prints the
//! resulting snapshot. Useful for reproducing UI bug reports and for checking
//! the stack invariants over recorded sessions.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info, warn};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use panestack::{
    parse_script, LogObserver, PanestackConfig, StackMetrics, StackScope, WindowStackManager,
};

#[derive(Parser)]
#[command(name = "panestack")]
#[command(about = "Replay window-stack commands and print the resulting state")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "~/.config/panestack/panestack.toml")]
    config: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Pretty-print the JSON snapshot
    #[arg(short, long)]
    pretty: bool,

    /// Verify the stack invariants after every command
    #[arg(long)]
    check: bool,

    /// Print collected metrics to stderr when done
    #[arg(long)]
    metrics: bool,

    /// Command script (JSON lines); reads stdin when omitted
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = PanestackConfig::load(&cli.config);
    let default_level = match (&loaded, cli.debug) {
        (_, true) => "debug".to_string(),
        (Ok(config), false) => config.logging.level.to_lowercase(),
        (Err(_), false) => "info".to_string(),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    info!("🚀 panestack {} (built {})", panestack::VERSION, env!("BUILD_DATE"));
    if let Some(commit) = option_env!("GIT_COMMIT") {
        debug!("Commit: {}", commit);
    }

    let config = match loaded {
        Ok(config) => {
            info!("✅ Configuration loaded from: {}", cli.config);
            config
        }
        Err(e) => {
            warn!("Failed to load configuration: {:#}", e);
            info!("📝 Using default configuration");
            PanestackConfig::default()
        }
    };

    let script = read_script(cli.script.as_ref())?;
    let commands = parse_script(&script).context("Failed to parse command script")?;
    info!("Replaying {} commands", commands.len());

    let metrics = Arc::new(StackMetrics::new(config.stack.metrics_history));
    let mut manager = WindowStackManager::from_config(&config.stack);
    manager.add_observer(Arc::clone(&metrics));
    if config.logging.events {
        manager.add_observer(LogObserver);
    }

    let scope = StackScope::provide(manager);
    let stack = scope.handle()?;

    for (n, command) in commands.into_iter().enumerate() {
        let outcome = stack.dispatch(command, &config.defaults);
        if !outcome.applied {
            debug!("Command {} ({} {}) matched no window", n + 1, outcome.op, outcome.id);
        }

        if cli.check {
            if let Err(e) = stack.read(|m| m.check_invariants()) {
                error!("❌ Invariant check failed after command {}: {}", n + 1, e);
                return Err(e).with_context(|| format!("after command {} ({})", n + 1, outcome.op));
            }
        }
    }

    let snapshot = stack.snapshot();
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&snapshot)
    } else {
        serde_json::to_string(&snapshot)
    }
    .context("Failed to serialize snapshot")?;
    println!("{}", rendered);

    if cli.metrics {
        let summary = serde_json::to_string_pretty(&metrics.snapshot())
            .context("Failed to serialize metrics")?;
        eprintln!("{}", summary);
    }

    info!(
        "✨ Done: {} windows, top z-index {}",
        snapshot.windows.len(),
        snapshot.top_z_index
    );
    Ok(())
}

fn read_script(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read script from stdin")?;
            Ok(buf)
        }
    }
}
