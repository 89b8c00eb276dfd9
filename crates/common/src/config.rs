//! Application configuration
//!
//! Two layers: [`Config`] holds runtime settings from the environment,
//! [`AppConfig`] is the parsed JSON config file describing which spreadsheets
//! and GitHub teams to report on. Config-file problems are fatal before any
//! fetching starts.

use std::env;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Runtime settings from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub sheets_token: Option<String>,
    pub discord_webhook_url: Option<String>,
    /// Path to the JSON config file
    pub config_path: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            github_token: env::var("GITHUB_TOKEN").ok(),
            sheets_token: env::var("SHEETS_TOKEN").ok(),
            discord_webhook_url: env::var("DISCORD_WEBHOOK_URL").ok(),
            config_path: env::var("CONFIG_PATH").unwrap_or_else(|_| "config.json".to_string()),
        }
    }
}

/// The full parsed config file
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub finance: FinanceConfig,
    pub recruitment: RecruitmentConfig,
    pub github: GithubConfig,
}

impl AppConfig {
    /// Parse and validate a JSON config document
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(raw)
            .map_err(|e| Error::Config(format!("invalid config file: {}", e)))?;
        config.finance.validate()?;
        config.recruitment.validate()?;
        Ok(config)
    }
}

/// A single sheet tab + A1 range within a spreadsheet
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetRange {
    pub sheet_name: String,
    pub sheet_range: String,
}

impl SheetRange {
    /// Full A1 reference, e.g. `Dashboard!A1:D20`
    pub fn full_range(&self) -> String {
        format!("{}!{}", self.sheet_name, self.sheet_range)
    }

    fn validate(&self, key: &str) -> Result<()> {
        if self.sheet_name.contains('!') {
            return Err(Error::Config(format!(
                "sheet_name for '{}' must not contain '!'",
                key
            )));
        }
        if self.sheet_range.is_empty() {
            return Err(Error::Config(format!(
                "sheet_range for '{}' cannot be empty",
                key
            )));
        }
        Ok(())
    }
}

/// Finance spreadsheet: which tabs/ranges to pull
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FinanceConfig {
    pub spreadsheet_id: String,
    pub summary: SheetRange,
    pub trajectory: SheetRange,
    pub transactions: SheetRange,
}

impl FinanceConfig {
    fn validate(&self) -> Result<()> {
        self.summary.validate("finance.summary")?;
        self.trajectory.validate("finance.trajectory")?;
        self.transactions.validate("finance.transactions")?;
        Ok(())
    }
}

/// Recruitment spreadsheet: which tabs/ranges to pull
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecruitmentConfig {
    pub spreadsheet_id: String,
    pub summary: SheetRange,
    pub npo_crm: SheetRange,
    pub sponsors_crm: SheetRange,
}

impl RecruitmentConfig {
    fn validate(&self) -> Result<()> {
        self.summary.validate("recruitment.summary")?;
        self.npo_crm.validate("recruitment.npo_crm")?;
        self.sponsors_crm.validate("recruitment.sponsors_crm")?;
        Ok(())
    }
}

/// GitHub reporting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    pub organization: String,
    #[serde(default)]
    pub settings: GithubSettings,
    /// Teams in configuration order; report order follows this
    pub teams: IndexMap<String, TeamConfig>,
}

/// Global thresholds for the weekly report
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GithubSettings {
    pub npo_label: String,
    pub stale_pr_days: i64,
    pub stale_issue_days: i64,
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            npo_label: "NPO-Feature".to_string(),
            stale_pr_days: 7,
            stale_issue_days: 10,
        }
    }
}

/// One team: repositories plus member/lead rosters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamConfig {
    /// `owner/name` repository identifiers; order kept, duplicates kept
    #[serde(default)]
    pub repos: Vec<String>,
    #[serde(default)]
    pub members: Vec<String>,
    /// Subset of `members` by convention, not enforced
    #[serde(default)]
    pub tech_leads: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config(finance_extra: &str) -> String {
        format!(
            r#"{{
                "finance": {{
                    "spreadsheet_id": "fin-id",
                    "summary": {{"sheet_name": "Dashboard", "sheet_range": "A1:D20"}},
                    "trajectory": {{"sheet_name": "Trajectory", "sheet_range": "A2:F52"}},
                    "transactions": {{"sheet_name": "Transactions", "sheet_range": "A2:I1000"}}{}
                }},
                "recruitment": {{
                    "spreadsheet_id": "rec-id",
                    "summary": {{"sheet_name": "Dashboard", "sheet_range": "A1:D20"}},
                    "npo_crm": {{"sheet_name": "NPO CRM", "sheet_range": "A2:J1000"}},
                    "sponsors_crm": {{"sheet_name": "Sponsor CRM", "sheet_range": "A2:K1000"}}
                }},
                "github": {{
                    "organization": "blueprint-eng",
                    "teams": {{
                        "platform": {{"repos": ["blueprint-eng/api"], "members": ["alice"], "tech_leads": []}}
                    }}
                }}
            }}"#,
            finance_extra
        )
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = AppConfig::from_json(&minimal_config("")).unwrap();
        assert_eq!(config.finance.spreadsheet_id, "fin-id");
        assert_eq!(config.finance.summary.full_range(), "Dashboard!A1:D20");
        assert_eq!(config.github.teams.len(), 1);
        // Settings section omitted entirely: defaults apply
        assert_eq!(config.github.settings.npo_label, "NPO-Feature");
        assert_eq!(config.github.settings.stale_pr_days, 7);
        assert_eq!(config.github.settings.stale_issue_days, 10);
    }

    #[test]
    fn test_missing_spreadsheet_id_is_fatal() {
        let raw = minimal_config("").replace(r#""spreadsheet_id": "fin-id","#, "");
        let err = AppConfig::from_json(&raw).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_unknown_sheet_key_rejected() {
        let raw = minimal_config(
            r#", "mystery": {"sheet_name": "X", "sheet_range": "A1:B2"}"#,
        );
        let err = AppConfig::from_json(&raw).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_bang_in_sheet_name_rejected() {
        let raw = minimal_config("").replace("\"Trajectory\"", "\"Trajectory!A1\"");
        let err = AppConfig::from_json(&raw).unwrap_err();
        assert!(err.to_string().contains("must not contain"));
    }

    #[test]
    fn test_teams_keep_configuration_order() {
        let raw = minimal_config("").replace(
            r#""platform": {"repos": ["blueprint-eng/api"], "members": ["alice"], "tech_leads": []}"#,
            r#""zeta": {}, "alpha": {}, "mid": {}"#,
        );
        let config = AppConfig::from_json(&raw).unwrap();
        let names: Vec<&String> = config.github.teams.keys().collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_team_entry_defaults_to_empty_rosters() {
        let raw = minimal_config("").replace(
            r#"{"repos": ["blueprint-eng/api"], "members": ["alice"], "tech_leads": []}"#,
            "{}",
        );
        let config = AppConfig::from_json(&raw).unwrap();
        let team = &config.github.teams["platform"];
        assert!(team.repos.is_empty());
        assert!(team.members.is_empty());
        assert!(team.tech_leads.is_empty());
    }
}
