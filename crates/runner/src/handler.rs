//! Run orchestration: three independent pipelines, one shared store
//!
//! The finance, recruitment, and GitHub pipelines run as separate tasks and
//! are independently fallible: a failure in one is recorded in the outcome
//! and never cancels the others.

use std::collections::BTreeMap;
use std::sync::Arc;

use common::config::AppConfig;
use common::{Config, Error, ResultStore};
use github::GitHubClient;
use processor::{run_finance_pipeline, run_recruitment_pipeline, WeeklyMetricsService};
use serde::Serialize;
use sheets::SheetsClient;
use tracing::{error, info};

use crate::discord;

/// Structured result of one run. The caller always gets this back; failures
/// inside the run are recorded here instead of propagating.
#[derive(Debug, Serialize)]
pub struct RunOutcome {
    pub status_code: u16,
    pub message: String,
    /// Pipeline name -> "success" | "failed"
    pub results: BTreeMap<String, String>,
    pub errors: Vec<String>,
}

/// Execute one full run. Never returns an error: a fatal problem (bad
/// config, unreadable file) comes back as a 500 outcome.
pub async fn run(config: &Config) -> RunOutcome {
    match run_inner(config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Run aborted: {}", e);
            RunOutcome {
                status_code: 500,
                message: "An error occurred".to_string(),
                results: BTreeMap::new(),
                errors: vec![e.to_string()],
            }
        }
    }
}

async fn run_inner(config: &Config) -> common::Result<RunOutcome> {
    info!("Starting metrics collection...");

    // Configuration problems are fatal before any fetching starts
    let raw = std::fs::read_to_string(&config.config_path)
        .map_err(|e| Error::Config(format!("cannot read {}: {}", config.config_path, e)))?;
    let app_config = AppConfig::from_json(&raw)?;

    let sheets_token = config
        .sheets_token
        .clone()
        .ok_or_else(|| Error::Config("SHEETS_TOKEN not set".to_string()))?;

    // One client per upstream, built once and shared
    let sheets_client = Arc::new(SheetsClient::new(sheets_token));
    let github_client = GitHubClient::new(config.github_token.clone());
    let service = WeeklyMetricsService::new(github_client, app_config.github.clone());
    let store = Arc::new(ResultStore::new());

    let finance = {
        let sheets_client = sheets_client.clone();
        let store = store.clone();
        let finance_config = app_config.finance.clone();
        tokio::spawn(async move {
            run_finance_pipeline(&sheets_client, &finance_config, &store).await
        })
    };

    let recruitment = {
        let sheets_client = sheets_client.clone();
        let store = store.clone();
        let recruitment_config = app_config.recruitment.clone();
        tokio::spawn(async move {
            run_recruitment_pipeline(&sheets_client, &recruitment_config, &store).await
        })
    };

    let github = {
        let store = store.clone();
        tokio::spawn(async move {
            info!("Generating weekly GitHub metrics");
            let reports = service.generate_weekly_metrics().await;
            for report in reports {
                info!("Metrics computed for team: {}", report.team_name);
                store.put(&format!("github/{}", report.team_name), &report);
            }
            info!("Completed GitHub metrics generation");
            Ok::<(), Error>(())
        })
    };

    let mut results = BTreeMap::new();
    let mut errors = Vec::new();

    for (name, task) in [
        ("finance", finance),
        ("recruitment", recruitment),
        ("github", github),
    ] {
        let status = match task.await {
            Ok(Ok(())) => {
                info!("Task '{}' completed successfully", name);
                "success"
            }
            Ok(Err(e)) => {
                let msg = format!("Task '{}' failed: {}", name, e);
                error!("{}", msg);
                errors.push(msg);
                "failed"
            }
            // A panicked task is a pipeline failure like any other
            Err(e) => {
                let msg = format!("Task '{}' failed: {}", name, e);
                error!("{}", msg);
                errors.push(msg);
                "failed"
            }
        };
        results.insert(name.to_string(), status.to_string());
    }

    // Whatever the pipelines managed to store still gets delivered
    if let Err(e) = notify_all(config, &store).await {
        let msg = format!("Notification failed: {}", e);
        error!("{}", msg);
        errors.push(msg);
    }

    info!("Finished metrics collection");
    Ok(finish(results, errors))
}

fn finish(results: BTreeMap<String, String>, errors: Vec<String>) -> RunOutcome {
    RunOutcome {
        status_code: if errors.is_empty() { 200 } else { 500 },
        message: "Metrics collection completed".to_string(),
        results,
        errors,
    }
}

/// Post one Discord message per stored result. The first delivery error
/// aborts the notification step; nothing is retried.
async fn notify_all(config: &Config, store: &ResultStore) -> common::Result<()> {
    let webhook_url = config
        .discord_webhook_url
        .as_deref()
        .ok_or_else(|| Error::Config("DISCORD_WEBHOOK_URL not set".to_string()))?;

    let client = reqwest::Client::new();
    for (key, value) in store.snapshot() {
        let message = discord::truncate_message(&format!("**{}**: {}", key, value));
        discord::send_discord_message(&client, webhook_url, &message).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_all_pipelines_succeeding_maps_to_200() {
        let outcome = finish(
            results(&[
                ("finance", "success"),
                ("recruitment", "success"),
                ("github", "success"),
            ]),
            Vec::new(),
        );
        assert_eq!(outcome.status_code, 200);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_any_failure_maps_to_500() {
        let outcome = finish(
            results(&[
                ("finance", "failed"),
                ("recruitment", "success"),
                ("github", "success"),
            ]),
            vec!["Task 'finance' failed: boom".to_string()],
        );
        assert_eq!(outcome.status_code, 500);
        assert_eq!(outcome.results["finance"], "failed");
        assert_eq!(outcome.results["github"], "success");
    }
}
