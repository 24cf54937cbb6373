use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use huegrid_core::{ConfigManager, Percent, Settings, SwatchParams};
use huegrid_pipeline::{ColorAggregator, ColorApiClient, Explorer};
use huegrid_view::{Controls, GridView};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod explore;
mod render;

#[derive(Parser)]
#[command(name = "huegrid")]
#[command(about = "HueGrid - browse the named colors of the hue spectrum", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format (json, pretty, table)
    #[arg(short, long, global = true, default_value = "pretty")]
    output: OutputFormat,

    /// Directory holding default.toml / {env}.toml / local.toml
    #[arg(long, global = true, env = "HUEGRID_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Configuration environment name
    #[arg(long, global = true, env = "HUEGRID_ENV")]
    env: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the color grid for one saturation/lightness pair
    Grid {
        /// Saturation percentage (0-100)
        #[arg(short, long)]
        saturation: Option<Percent>,

        /// Lightness percentage (0-100)
        #[arg(short, long)]
        lightness: Option<Percent>,
    },

    /// Interactive explorer reading commands from stdin
    Explore {
        /// Initial saturation percentage (0-100)
        #[arg(short, long)]
        saturation: Option<Percent>,

        /// Initial lightness percentage (0-100)
        #[arg(short, long)]
        lightness: Option<Percent>,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Serialize)]
struct ConfigResult {
    config_dir: String,
    env: String,
    settings: Settings,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigManager::new(cli.config_dir.clone(), cli.env.clone())
        .context("Failed to load configuration")?;
    init_logging(config.settings(), cli.verbose);
    debug!(
        "Loaded configuration from {:?} (env {})",
        config.config_dir(),
        config.env()
    );

    match execute_command(&cli, &config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// `RUST_LOG` wins; otherwise the configured level, bumped to debug by `-v`.
fn init_logging(settings: &Settings, verbose: bool) {
    let fallback = if verbose {
        "debug"
    } else {
        settings.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn execute_command(cli: &Cli, config: &ConfigManager) -> Result<()> {
    let settings = config.settings();
    match &cli.command {
        Commands::Grid {
            saturation,
            lightness,
        } => {
            let params = resolve_params(settings, *saturation, *lightness)?;
            execute_grid_command(settings, params, cli.output).await
        }
        Commands::Explore {
            saturation,
            lightness,
        } => {
            let params = resolve_params(settings, *saturation, *lightness)?;
            explore::run(settings, params, cli.output).await
        }
        Commands::Config => {
            let result = ConfigResult {
                config_dir: config.config_dir().display().to_string(),
                env: config.env().to_string(),
                settings: settings.clone(),
            };
            match cli.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Pretty | OutputFormat::Table => {
                    println!("{}: {}", "config_dir".cyan().bold(), result.config_dir.green());
                    println!("{}: {}", "env".cyan().bold(), result.env.green());
                    println!();
                    print!("{}", config.to_toml()?);
                }
            }
            Ok(())
        }
    }
}

fn resolve_params(
    settings: &Settings,
    saturation: Option<Percent>,
    lightness: Option<Percent>,
) -> Result<SwatchParams> {
    let defaults = settings
        .defaults
        .params()
        .context("Invalid default saturation/lightness")?;
    Ok(SwatchParams::new(
        saturation.unwrap_or(defaults.saturation),
        lightness.unwrap_or(defaults.lightness),
    ))
}

async fn execute_grid_command(
    settings: &Settings,
    params: SwatchParams,
    format: OutputFormat,
) -> Result<()> {
    let client = ColorApiClient::new(&settings.api).context("Failed to build HTTP client")?;
    let explorer = Explorer::new(ColorAggregator::new(client), settings.view.on_error);

    explorer
        .request(params)
        .await
        .context("Aggregation task failed")?;

    let state = explorer.current();
    let mut controls = Controls::new(params);
    let view = GridView::build(&state, &mut controls, None);
    print_output(format, &view)?;

    if let Some(error) = state.error() {
        return Err(anyhow::Error::new(error.clone()).context("Aggregation failed"));
    }
    Ok(())
}

fn print_output(format: OutputFormat, view: &GridView) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(view)?);
        }
        OutputFormat::Pretty => {
            print!("{}", render::render_grid(view));
        }
        OutputFormat::Table => {
            print!("{}", render::render_table(view));
        }
    }
    Ok(())
}
