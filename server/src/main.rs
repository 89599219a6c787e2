mod handlers;
mod server_config;
mod web_server;

use clap::Parser;
use xenotic_engine::config::{ConfigManager, FileContentConfigProvider, Validate};
use xenotic_engine::{GameService, log, log_warn, logger};

use server_config::{DEFAULT_CONFIG_PATH, ServerConfig};
use web_server::{WebServerState, run_web_server};

#[derive(Parser)]
#[command(name = "xenotic_server", about = "Tic-tac-toe against a minimax AI over HTTP")]
struct Args {
    /// YAML config file; defaults apply when it does not exist.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Overrides `bind_address` from the config file.
    #[arg(long)]
    bind: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Writes the default config to `--config` and exits.
    #[arg(long)]
    write_default_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager: ConfigManager<FileContentConfigProvider, ServerConfig> =
        ConfigManager::from_yaml_file(&args.config);

    if args.write_default_config {
        config_manager.set_config(&ServerConfig::default())?;
        println!("Default config written to {}", args.config);
        return Ok(());
    }

    let mut config = config_manager.get_config()?;
    if let Some(bind) = args.bind {
        config.bind_address = bind;
        config.validate()?;
    }

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, config.log_level);

    log!(
        "Registry capacity {} (evicting {} at a time)",
        config.registry.capacity,
        config.registry.eviction_batch
    );
    let state = WebServerState::new(GameService::new(config.registry.clone()));

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log_warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        log!("Shutdown signal received");
    };

    run_web_server(state, &config, shutdown_signal).await?;

    log!("Server shut down gracefully");

    Ok(())
}
