use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cf_url_rewriter::config::{load_config, RewriterConfig};
use cf_url_rewriter::observability::{init_logging, metrics, LogTarget};
use cf_url_rewriter::{
    handle_event, read_event, CloudFrontRequest, EdgeRewriter, EdgeServer, HttpsJsonFetcher,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;

#[derive(Parser)]
#[command(name = "rewriter-cli")]
#[command(about = "Operator CLI for the CloudFront artifact URL rewriter", long_about = None)]
struct Cli {
    /// TOML config file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide a single URI with live index lookups
    Decide {
        uri: String,
        /// Host header the viewer would send
        #[arg(long)]
        host: String,
    },
    /// Run a viewer-request event JSON file through the Lambda handler
    Event { file: PathBuf },
    /// Run the local edge emulator
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RewriterConfig::default(),
    };
    init_logging(&config.observability.log_level, LogTarget::Terminal);

    match cli.command {
        Commands::Decide { uri, host } => {
            let rewriter = EdgeRewriter::new(HttpsJsonFetcher::new(&config.index)?, &config.index);
            let request = CloudFrontRequest::new(uri).with_header("Host", host);
            let result = rewriter.handle(request).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Event { file } => {
            let event = read_event(&file)?;
            let rewriter = EdgeRewriter::new(HttpsJsonFetcher::new(&config.index)?, &config.index);
            let result = handle_event(&rewriter, event).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Serve => serve(config).await?,
    }

    Ok(())
}

async fn serve(config: RewriterConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.emulator.bind_address).await?;
    let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);

    EdgeServer::new(config)?.run(listener, shutdown_rx).await?;
    Ok(())
}
