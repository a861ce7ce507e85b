use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use upm::core::UpmError;

mod cli;

#[derive(Parser)]
#[command(name = "upm")]
#[command(about = "Unified package management for .NET projects")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert legacy per-project package management to the unified manifest
    Convert {
        /// Root of the tree to convert (defaults to the current directory)
        #[arg(short, long)]
        root: Option<String>,
        /// Path of the unified manifest (defaults to <root>/upm.dependencies)
        #[arg(short, long)]
        manifest: Option<String>,
        /// Merge into existing upm files instead of aborting
        #[arg(short, long)]
        force: bool,
        /// Run the install pipeline after converting
        #[arg(long)]
        install: bool,
        /// Set up MSBuild auto-restore integration
        #[arg(long)]
        init_auto_restore: bool,
    },
}

fn main() -> Result<(), UpmError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            root,
            manifest,
            force,
            install,
            init_auto_restore,
        } => cli::convert::run(root, manifest, force, install, init_auto_restore),
    };

    if let Err(ref e) = result {
        eprintln!("\nerror: {}", e);
    }

    result
}
