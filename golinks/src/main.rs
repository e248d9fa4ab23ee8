//! golinks CLI
//!
//! Command-line front end for the go-link redirector. Each invocation
//! loads the file-backed settings store, fires the lifecycle trigger a
//! browser would (install on first run, startup afterwards) so the
//! redirect rule is reconciled, then executes the requested command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use golinks::cli::{
    generate_completion, handle_click, handle_open, handle_resolve, handle_rules, handle_set,
    handle_status, handle_watch, Cli, Commands,
};
use golinks::events::{InstallReason, Trigger};
use golinks::runtime::Runtime;
use golinks_core::default_settings_path;
use golinks_platform::{BrowserSurface, ConsoleSurface, FileStore, SettingsStore};
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Determine settings path: CLI flag > env var > default
    let settings_path = cli.config.clone().unwrap_or_else(|| {
        std::env::var("GOLINKS_SETTINGS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_settings_path())
    });
    debug!(path = %settings_path.display(), "settings file");

    let store = FileStore::load(&settings_path).await?;
    let fresh_install = store.is_fresh_install();

    let store: Arc<dyn SettingsStore> = Arc::new(store);
    let surface: Arc<dyn BrowserSurface> = Arc::new(ConsoleSurface);
    let runtime = Runtime::new(store, surface);

    // Reconcile before any command runs, the way the background script
    // does on install and on every browser startup.
    let boot = if fresh_install {
        Trigger::Installed {
            reason: InstallReason::Install,
        }
    } else {
        Trigger::Startup
    };
    runtime.lifecycle.dispatch(boot).await?;

    let result = match cli.command {
        Commands::Status => handle_status(&runtime).await,
        Commands::Set { ref url } => handle_set(&runtime, url).await,
        Commands::Open { ref text } => handle_open(&runtime, text).await,
        Commands::Click => handle_click(&runtime).await,
        Commands::Resolve { ref url } => handle_resolve(&runtime, url).await,
        Commands::Rules { ref format } => handle_rules(&runtime, format).await,
        Commands::Watch => handle_watch(&runtime).await,
        Commands::Completion { shell } => {
            generate_completion(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if cli.verbose {
            eprintln!("Error details: {:?}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
