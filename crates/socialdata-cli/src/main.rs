mod linkedin;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "socialdata-cli")]
#[command(about = "LinkedIn social-data connector command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the LinkedIn authorization URL to open in a browser
    LoginUrl {
        /// Permission to request; repeat for several. Defaults to LINKEDIN_CONNECT_SCOPES
        #[arg(long = "scope")]
        scopes: Vec<String>,

        /// OAuth state to embed; a random one is generated when omitted
        #[arg(long)]
        state: Option<String>,
    },
    /// Exchange an authorization code and store the resulting access token
    Exchange {
        /// The `code` query parameter LinkedIn appended to the callback URL
        #[arg(long)]
        code: String,
    },
    /// Fetch, filter and normalize the posts of a configured feed
    Fetch {
        /// Feed name from the feeds file
        #[arg(long)]
        feed: String,

        /// Feeds file to read instead of SOCIALDATA_FEEDS_PATH
        #[arg(long)]
        feeds_path: Option<PathBuf>,
    },
    /// Show LinkedIn's metadata for the stored access token
    Introspect,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = socialdata_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = linkedin::Context::new(config)?;

    match cli.command {
        Commands::LoginUrl { scopes, state } => {
            linkedin::run_login_url(&ctx, &scopes, state.as_deref())?;
        }
        Commands::Exchange { code } => linkedin::run_exchange(&ctx, &code).await?,
        Commands::Fetch { feed, feeds_path } => {
            linkedin::run_fetch(&ctx, &feed, feeds_path.as_deref()).await?;
        }
        Commands::Introspect => linkedin::run_introspect(&ctx).await?,
    }

    Ok(())
}
