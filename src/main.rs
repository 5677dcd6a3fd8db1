//! CLI entry point for hi-there

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hi-there")]
#[command(version)]
#[command(about = "A Markdown blog with category browsing and related posts", long_about = None)]
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
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new unpublished post
    New {
        /// Category to file the post under
        category: String,

        /// Title of the new post
        title: String,

        /// Slug of the new post (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Clean the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (posts, categories, tags, ids)
        #[arg(default_value = "posts")]
        r#type: String,

        /// Only list this category
        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// Check that the catalog and the post files agree
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "hi_there=debug,info"
    } else {
        "hi_there=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to read current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            hi_there::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New {
            category,
            title,
            slug,
        } => {
            let blog = hi_there::Blog::new(&base_dir)?;
            tracing::info!("Creating new post in {} with title: {}", category, title);
            hi_there::commands::new::create_post(&blog, &category, &title, slug.as_deref())?;
        }

        Commands::Generate => {
            let blog = hi_there::Blog::new(&base_dir)?;
            tracing::info!("Generating static files...");
            blog.generate()?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip } => {
            let blog = hi_there::Blog::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            hi_there::server::start(&blog, &ip, port).await?;
        }

        Commands::Clean => {
            let blog = hi_there::Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type, category } => {
            let blog = hi_there::Blog::new(&base_dir)?;
            hi_there::commands::list::run(&blog, &r#type, category.as_deref())?;
        }

        Commands::Check => {
            let blog = hi_there::Blog::new(&base_dir)?;
            hi_there::commands::check::run(&blog)?;
        }
    }

    Ok(())
}
