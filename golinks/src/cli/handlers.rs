//! Command execution handlers

use anyhow::Result;
use colored::*;
use std::time::Duration;
use tracing::info;

use crate::cli::OutputFormat;
use crate::events::Trigger;
use crate::options::{OptionsView, SaveOutcome};
use crate::runtime::Runtime;
use golinks_platform::RuleEngine;

/// Show the configuration state.
pub async fn handle_status(runtime: &Runtime) -> Result<()> {
    match runtime.options.view().await? {
        OptionsView::Configured { base_url } => {
            println!("{}", "golinks is configured".bold());
            println!("Base URL: {}", base_url.cyan());
            println!(
                "Redirect: {} rewrites to {}",
                "http://go/<rest>".yellow(),
                format!("{}<rest>", base_url).green()
            );
        }
        view @ OptionsView::SetupRequired => {
            println!("{}", view.status_line().red());
            println!("Set a base URL with `golinks set <url>` to activate redirects.");
        }
    }
    Ok(())
}

/// Validate and save the base URL, then drive the storage-change
/// trigger a browser would deliver so the rule set converges before we
/// return.
pub async fn handle_set(runtime: &Runtime, url: &str) -> Result<()> {
    let mut changes = runtime.store.subscribe();

    match runtime.options.save(url).await? {
        SaveOutcome::Rejected { feedback } => {
            println!("{}", feedback.message.red());
            anyhow::bail!("base URL not saved");
        }
        SaveOutcome::Saved { base_url, feedback } => {
            match tokio::time::timeout(Duration::from_secs(1), changes.recv()).await {
                Ok(Ok(change)) => {
                    runtime
                        .lifecycle
                        .dispatch(Trigger::StorageChanged(change))
                        .await?;
                }
                // Missed or closed feed: reconcile from current state.
                _ => runtime.rules.reconcile().await?,
            }

            println!("{}", feedback.message.green());
            println!(
                "{} now redirects to {}",
                "http://go/<rest>".yellow(),
                format!("{}<rest>", base_url).green()
            );
        }
    }
    Ok(())
}

/// Keyword entry with the typed text.
pub async fn handle_open(runtime: &Runtime, text: &str) -> Result<()> {
    // The surface reports what the browser would do.
    runtime.omnibox.on_input_entered(text).await?;
    Ok(())
}

/// Action-icon click.
pub async fn handle_click(runtime: &Runtime) -> Result<()> {
    runtime.omnibox.on_action_clicked().await?;
    Ok(())
}

/// Evaluate the installed rule set against a request URL.
pub async fn handle_resolve(runtime: &Runtime, url: &str) -> Result<()> {
    match runtime.engine.evaluate(url).await {
        Some(destination) => {
            println!("{} {} {}", url, "->".bold(), destination.green());
        }
        None => {
            println!("{} (no redirect; request passes through)", url.yellow());
        }
    }
    Ok(())
}

/// List installed dynamic rules.
pub async fn handle_rules(runtime: &Runtime, format: &OutputFormat) -> Result<()> {
    let rules = runtime.engine.dynamic_rules().await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rules)?),
        OutputFormat::Table => {
            if rules.is_empty() {
                println!("No dynamic rules installed (redirect disabled).");
                return Ok(());
            }
            for rule in rules {
                println!(
                    "{} (priority {})",
                    format!("Rule {}", rule.id).bold(),
                    rule.priority
                );
                println!("  Filter:       {}", rule.regex_filter.yellow());
                println!("  Substitution: {}", rule.regex_substitution.green());
                let resources: Vec<&str> =
                    rule.resource_types.iter().map(|t| t.as_str()).collect();
                println!("  Resources:    {}", resources.join(", "));
            }
        }
    }
    Ok(())
}

/// Follow the settings store until interrupted.
pub async fn handle_watch(runtime: &Runtime) -> Result<()> {
    println!("Watching settings changes; press Ctrl-C to stop.");

    let watch = runtime.rules.clone().spawn_watch();
    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    watch.abort();

    Ok(())
}

/// Generate shell completions to stdout.
pub fn generate_completion(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = crate::cli::Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
