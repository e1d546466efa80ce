//! CLI entry point for quillpost

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quillpost")]
#[command(version)]
#[command(about = "A small personal blog server", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the blog
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Export static files to the public directory
    #[command(alias = "g")]
    Generate {
        /// Regenerate on content changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Create a new (unpublished) post
    New {
        /// Title of the new post
        title: String,

        /// Slug to use instead of the slugified title
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// List published posts
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Remove the public directory
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "quillpost=debug,tower_http=debug,info"
    } else {
        "quillpost=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Server { port, ip } => {
            let site = quillpost::Site::new(&base_dir)?;
            quillpost::server::start(&site, &ip, port).await?;
        }

        Commands::Generate { watch } => {
            let site = quillpost::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            site.generate()?;
            println!("Generated successfully!");

            if watch {
                quillpost::commands::generate::watch(&site).await?;
            }
        }

        Commands::New { title, slug } => {
            let site = quillpost::Site::new(&base_dir)?;
            let path = quillpost::commands::new::create_post(&site, &title, slug.as_deref())?;
            println!("Created: {}", path.display());
        }

        Commands::List { json } => {
            let site = quillpost::Site::new(&base_dir)?;
            quillpost::commands::list::run(&site, json)?;
        }

        Commands::Clean => {
            let site = quillpost::Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("quillpost version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
