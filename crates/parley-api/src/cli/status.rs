//! System status dashboard command.

use anyhow::Result;
use console::style;
use serde::Serialize;

use parley_core::chat::store::MessageStore;
use parley_infra::config::{MODEL_OVERRIDE_ENV, provider_env_vars};
use parley_types::llm::ProviderType;

use crate::state::AppState;

/// Everything `parley status` reports.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub version: &'static str,
    pub data_dir: String,
    pub database_url: String,
    pub provider: ProviderType,
    pub model: Option<String>,
    pub api_key_set: bool,
    pub total_turns: u64,
    #[serde(skip)]
    key_var: &'static str,
    #[serde(skip)]
    model_var: &'static str,
}

/// Read the stored turn count and the model settings as the environment
/// currently resolves them.
pub async fn collect_status(state: &AppState) -> Result<StatusReport> {
    let total_turns = state.router.store().count_turns().await?;

    let provider = state.config.model.provider;
    let (key_var, model_var) = provider_env_vars(provider);
    let api_key_set = std::env::var(key_var).is_ok_and(|v| !v.trim().is_empty());
    let model = std::env::var(MODEL_OVERRIDE_ENV)
        .ok()
        .or_else(|| std::env::var(model_var).ok())
        .or_else(|| state.config.model.model.clone());

    Ok(StatusReport {
        version: env!("CARGO_PKG_VERSION"),
        data_dir: state.data_dir.display().to_string(),
        database_url: state.database_url.clone(),
        provider,
        model,
        api_key_set,
        total_turns,
        key_var,
        model_var,
    })
}

/// Display database location, model settings and stored turn count.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let report = collect_status(state).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("  {} Parley v{}", style("⚡").bold(), report.version);
    println!();

    println!("  {}", style("── Model ──").dim());
    println!("  Provider: {}", style(report.provider).bold());
    match &report.model {
        Some(model) => println!("  Model:    {}", style(model).bold()),
        None => println!(
            "  Model:    {} (set {})",
            style("not set").yellow(),
            report.model_var
        ),
    }
    if report.api_key_set {
        println!("  API key:  {}", style("set").green());
    } else {
        println!(
            "  API key:  {} (set {})",
            style("missing").yellow(),
            report.key_var
        );
    }
    println!();

    println!("  {}", style("── History ──").dim());
    println!("  Stored turns: {}", style(report.total_turns).bold());
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(&report.data_dir).dim());
    println!("  Database: {}", style(&report.database_url).dim());
    println!();

    Ok(())
}
