//! cpt-templates CLI tool

#![forbid(unsafe_code)]

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{CheckCommand, RenderCommand, RequestKind, ResolveCommand};
use cpt_templates::observability::{self, ObservabilityConfig};

#[derive(Parser)]
#[command(name = "cpt-templates")]
#[command(version)]
#[command(about = "Inspect content type template routing for a site", long_about = None)]
struct Cli {
    /// Site configuration file
    #[arg(short, long, global = true, default_value = "cpt.toml")]
    config: PathBuf,

    /// Log template decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which template renders a request
    Resolve {
        /// Request kind
        #[arg(value_enum)]
        kind: RequestKind,
        /// Content type or taxonomy slug
        slug: String,
        /// Template used when no group handles the request
        #[arg(long, default_value = "index.php")]
        default: PathBuf,
    },
    /// Register every group and print a summary
    Check,
    /// Render a request to stdout
    Render {
        /// Request kind
        #[arg(value_enum)]
        kind: RequestKind,
        /// Content type or taxonomy slug
        slug: String,
        /// JSON file with the posts to render
        #[arg(long)]
        posts: Option<PathBuf>,
        /// Template used when no group handles the request
        #[arg(long, default_value = "index.php")]
        default: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    observability::init_with(
        &ObservabilityConfig::new("cpt-templates").with_verbose(cli.verbose),
    )?;

    match cli.command {
        Commands::Resolve {
            kind,
            slug,
            default,
        } => ResolveCommand::new(cli.config, kind.request(slug), default).execute(),
        Commands::Check => CheckCommand::new(cli.config).execute(),
        Commands::Render {
            kind,
            slug,
            posts,
            default,
        } => RenderCommand::new(cli.config, kind.request(slug), posts, default).execute(),
    }
}
