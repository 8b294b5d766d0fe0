// Hosts file synchronization daemon

use anyhow::{Context, Result};
use clap::Parser;
use hostsync::{
    addresses::{AddressSource, InterfaceSelector, SystemAddressSource},
    config::load_config_or_default,
    identity::SystemHostResolver,
    reconciler::Reconciler,
    render::JinjaEngine,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal;
use tokio::time::{interval, MissedTickBehavior};

/// Configuration file read when `--config` is not given (optional)
const DEFAULT_CONFIG_PATH: &str = "/etc/hostsync/config.toml";

#[derive(Parser)]
#[command(name = "hostsync")]
#[command(about = "Keeps /etc/hosts in sync with an interface's addresses", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // One reconciler, one thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .thread_name("hostsync")
        .enable_time()
        .enable_io()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let (config_path, explicit) = match args.config {
        Some(path) => (path, true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };
    let config = load_config_or_default(&config_path, explicit)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.general.log_level),
    )
    .init();

    log::info!("Starting hostsync daemon");

    let selector = match config.general.interface.clone() {
        Some(iface) => {
            log::info!("Interface: {} (from config)", iface);
            InterfaceSelector::Fixed(iface)
        }
        None => {
            log::info!(
                "Interface: named by {}",
                config.general.interface_file.display()
            );
            InterfaceSelector::File(config.general.interface_file.clone())
        }
    };
    log::info!("Template: {}", config.general.template.display());
    log::info!("Output: {}", config.general.output.display());
    log::info!("Poll interval: {}s", config.general.poll_interval);

    let source = SystemAddressSource::new(selector);
    let interface = source
        .interface_name()
        .context("Failed to determine the interface to monitor")?;

    let mut reconciler = Reconciler::new(
        Box::new(source),
        Box::new(SystemHostResolver),
        Box::new(JinjaEngine),
        config.general.template.clone(),
        config.general.output.clone(),
    );

    // Startup reading; any failure here is fatal
    reconciler
        .initialize()
        .with_context(|| format!("Failed initial read of interface {}", interface))?;

    // First tick fires immediately and performs the initial render
    let mut poll_timer = interval(Duration::from_secs(config.general.poll_interval));
    poll_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Set up signal handlers for graceful shutdown
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
        .context("Failed to set up SIGTERM handler")?;
    let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())
        .context("Failed to set up SIGINT handler")?;

    log::info!("Daemon started successfully");

    // Main polling loop
    loop {
        tokio::select! {
            // Shutdown signals
            _ = sigterm.recv() => {
                log::info!("Received SIGTERM");
                break;
            }
            _ = sigint.recv() => {
                log::info!("Received SIGINT");
                break;
            }

            _ = poll_timer.tick() => {
                reconciler.poll();
            }
        }
    }

    log::info!("Shutdown complete");
    Ok(())
}
