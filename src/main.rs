//! Traffic Lens CLI
//!
//! Fetches visitor analytics for a project and renders a terminal dashboard.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::time::Duration;

use traffic_lens::commands::{
    display_schema, display_version, execute_fetch, execute_normalize, validate_args,
    validate_normalize_args, validate_report_file, FetchArgs, NormalizeArgs,
};
use traffic_lens::utils::config::{DEFAULT_API_BASE_URL, DEFAULT_PROJECT_ID};

/// Traffic Lens - visitor analytics dashboard
#[derive(Parser, Debug)]
#[command(name = "traffic-lens")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch metrics from the analytics API and show the dashboard
    Fetch {
        /// Analytics project id
        #[arg(short, long, env = "TRAFFIC_LENS_PROJECT", default_value = DEFAULT_PROJECT_ID)]
        project: String,

        /// API key for the detailed log endpoint
        #[arg(
            short = 'k',
            long,
            env = "SWETRIX_API_KEY",
            default_value = "",
            hide_env_values = true
        )]
        api_key: String,

        /// Analytics API base URL
        #[arg(long, env = "TRAFFIC_LENS_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
        base_url: String,

        /// Lookback window in days
        #[arg(short, long, default_value = "7")]
        days: u32,

        /// Timeout for the whole fetch, in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,

        /// Output path for the JSON metrics report (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not print the dashboard
        #[arg(short, long)]
        quiet: bool,
    },

    /// Normalize saved API payloads without network access
    Normalize {
        /// Saved birdseye payload (JSON)
        #[arg(long)]
        birdseye: PathBuf,

        /// Saved detailed log payload (JSON)
        #[arg(long)]
        log: PathBuf,

        /// Project id the birdseye payload is keyed by
        #[arg(short, long, default_value = DEFAULT_PROJECT_ID)]
        project: String,

        /// Lookback window the payloads cover, in days
        #[arg(short, long, default_value = "7")]
        days: u32,

        /// Output path for the JSON metrics report (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not print the dashboard
        #[arg(short, long)]
        quiet: bool,
    },

    /// Validate a metrics report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Fetch {
            project,
            api_key,
            base_url,
            days,
            timeout,
            output,
            quiet,
        } => {
            let args = FetchArgs {
                base_url,
                project_id: project,
                api_key,
                window_days: days,
                timeout: Duration::from_secs(timeout),
                output_json: output,
                print_summary: !quiet,
            };

            validate_args(&args)?;
            execute_fetch(args).await?;
        }

        Commands::Normalize {
            birdseye,
            log,
            project,
            days,
            output,
            quiet,
        } => {
            let args = NormalizeArgs {
                project_id: project,
                window_days: days,
                birdseye_path: birdseye,
                log_path: log,
                output_json: output,
                print_summary: !quiet,
            };

            validate_normalize_args(&args)?;
            execute_normalize(args).await?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
