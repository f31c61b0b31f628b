use clap::{Parser, Subcommand};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use llm_compare::infrastructure::adapters::ConsoleRenderer;
use llm_compare::infrastructure::http::{self, AppState};
use llm_compare::{Aggregator, AppError, Config, ConfigError, PromptRequest, ProviderId};

#[derive(Parser)]
#[command(name = "llm-compare")]
#[command(about = "Ask several LLM providers the same question side by side", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Listen address (overrides config)
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Send a prompt from the terminal and print every answer
    Query {
        /// The prompt to send
        prompt: String,

        /// Providers to ask, comma separated
        #[arg(short, long, value_delimiter = ',', default_value = "openai,gemini,claude")]
        models: Vec<String>,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { bind } => load_config(&cli.config).and_then(|config| serve(config, bind)),
        Commands::Query { prompt, models } => load_config(&cli.config).and_then(|config| query(config, &prompt, &models)),
        Commands::Version => {
            println!("llm-compare v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(&cli.config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Validation(e)) => {
            eprintln!("{}", e.describe());
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(config_path: &str) -> Result<Config, AppError> {
    let config = if Path::new(config_path).exists() {
        Config::load(config_path)?
    } else {
        tracing::debug!("No config file at {}, using defaults and environment", config_path);
        Config::load_env()?
    };

    for id in ProviderId::ALL {
        if config.llm.api_key(id).is_none() {
            tracing::warn!("No API key configured for {}; its requests will fail", id.label());
        }
    }

    Ok(config)
}

fn runtime() -> Result<tokio::runtime::Runtime, AppError> {
    tokio::runtime::Runtime::new().map_err(|e| AppError::Server(format!("Failed to start runtime: {}", e)))
}

fn serve(config: Config, bind_override: Option<String>) -> Result<(), AppError> {
    let bind = bind_override.unwrap_or_else(|| config.server.bind.clone());
    let state = Arc::new(AppState::new(Aggregator::from_config(&config.llm)));

    tracing::info!("Starting llm-compare v{}", env!("CARGO_PKG_VERSION"));
    if config.server.allowed_origins.is_empty() {
        tracing::info!("CORS: allowing any origin");
    } else {
        tracing::info!("CORS: allowing {}", config.server.allowed_origins.join(", "));
    }

    runtime()?.block_on(http::run(state, &bind, &config.server.allowed_origins))
}

fn query(config: Config, prompt: &str, models: &[String]) -> Result<(), AppError> {
    let request = PromptRequest::new(prompt, models)?;
    let aggregator = Aggregator::from_config(&config.llm);
    let renderer = ConsoleRenderer::new();

    println!("{}", renderer.render_loading(request.providers()));
    let response = runtime()?.block_on(aggregator.run(&request));
    println!();
    print!("{}", renderer.render_response(&response));

    Ok(())
}

fn init_config(config_path: &str) -> Result<(), AppError> {
    if Path::new(config_path).exists() {
        return Err(ConfigError::InvalidValue(format!("{} already exists, not overwriting", config_path)).into());
    }

    let yaml = Config::default().to_yaml()?;
    std::fs::write(config_path, yaml).map_err(ConfigError::from)?;
    println!("Wrote default config to {}", config_path);
    Ok(())
}
