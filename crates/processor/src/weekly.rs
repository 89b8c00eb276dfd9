//! Weekly team metrics: accumulator, report builder, orchestrator

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use common::config::{GithubConfig, TeamConfig};
use common::models::{
    AlertMetrics, NpoMetrics, ParticipationMetrics, TeamReport, VelocityMetrics,
};
use github::ClientError;
use tracing::{debug, error, info};

use crate::metrics::{days_since, hours_between, mean, participation_rate};
use crate::source::ActivitySource;

/// Reporting window shared by every team in a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    /// Window ending at `end` and reaching `days` back
    pub fn trailing_days(end: DateTime<Utc>, days: i64) -> Self {
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Raw counts accumulated during one team's walk. Counts only ever grow
/// while the walk runs; the value is discarded once a report has been
/// derived from it.
#[derive(Debug, Default)]
pub struct RawTeamMetrics {
    pub merged_prs: u32,
    pub issues_closed: u32,
    /// Open→merge durations in hours, in walk order
    pub cycle_times: Vec<f64>,
    /// Distinct member logins that opened a PR in-window
    pub pr_authors: HashSet<String>,
    pub non_lead_reviews: u32,
    pub npo_features_closed: u32,
    /// Open→close durations in hours for labeled features
    pub npo_time_to_close: Vec<f64>,
    /// `"repo#number (N days)"` descriptors
    pub stale_prs: Vec<String>,
    /// `"repo#number"` descriptors
    pub stale_issues: Vec<String>,
}

/// Per-member counters. Logged for observability, not surfaced in the report.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemberActivity {
    pub prs_opened: u32,
    pub prs_merged: u32,
    pub reviews: u32,
}

/// Walks every configured team's activity once per run and derives the
/// weekly reports.
pub struct WeeklyMetricsService<S> {
    source: S,
    config: GithubConfig,
}

impl<S: ActivitySource> WeeklyMetricsService<S> {
    pub fn new(source: S, config: GithubConfig) -> Self {
        Self { source, config }
    }

    /// Compute the shared 7-day window once, then visit teams in
    /// configuration order. Always returns one report per team.
    pub async fn generate_weekly_metrics(&self) -> Vec<TeamReport> {
        let now = Utc::now();
        let window = ReportWindow::trailing_days(now, 7);

        info!(
            "Generating report: {} to {}",
            window.start.date_naive(),
            window.end.date_naive()
        );

        let mut reports = Vec::with_capacity(self.config.teams.len());
        for (team_name, team) in &self.config.teams {
            let (raw, member_activity) = self.team_metrics(team_name, team, &window, now).await;
            for (login, activity) in &member_activity {
                debug!(
                    "{} activity for {}: opened={} merged={} reviews={}",
                    team_name, login, activity.prs_opened, activity.prs_merged, activity.reviews
                );
            }
            reports.push(build_report(team_name, team, &raw, &window));
        }
        reports
    }

    /// Accumulate one team's raw counts across its repositories. Fetch
    /// failures are isolated per repository: that repository contributes
    /// nothing and the walk moves on.
    pub async fn team_metrics(
        &self,
        team_name: &str,
        team: &TeamConfig,
        window: &ReportWindow,
        now: DateTime<Utc>,
    ) -> (RawTeamMetrics, HashMap<String, MemberActivity>) {
        info!("--- Processing {} ---", team_name);

        let members: HashSet<&str> = team.members.iter().map(String::as_str).collect();
        let leads: HashSet<&str> = team.tech_leads.iter().map(String::as_str).collect();

        let mut raw = RawTeamMetrics::default();
        let mut member_activity: HashMap<String, MemberActivity> = team
            .members
            .iter()
            .map(|m| (m.clone(), MemberActivity::default()))
            .collect();

        for repo in &team.repos {
            let Some((owner, name)) = repo.split_once('/') else {
                error!("Skipping malformed repo identifier: {}", repo);
                continue;
            };

            if let Err(e) = self
                .walk_pull_requests(
                    owner,
                    name,
                    &members,
                    &leads,
                    window,
                    now,
                    &mut raw,
                    &mut member_activity,
                )
                .await
            {
                error!("Error processing PRs for {}: {}", repo, e);
            }

            if let Err(e) = self.walk_issues(owner, name, window, now, &mut raw).await {
                error!("Error processing issues for {}: {}", repo, e);
            }
        }

        (raw, member_activity)
    }

    #[allow(clippy::too_many_arguments)]
    async fn walk_pull_requests(
        &self,
        owner: &str,
        name: &str,
        members: &HashSet<&str>,
        leads: &HashSet<&str>,
        window: &ReportWindow,
        now: DateTime<Utc>,
        raw: &mut RawTeamMetrics,
        member_activity: &mut HashMap<String, MemberActivity>,
    ) -> Result<(), ClientError> {
        let prs = self
            .source
            .pull_requests_updated_since(owner, name, window.start)
            .await?;

        for pr in prs {
            // The stream is updated-desc: everything past this point is older
            // still, so the whole repository walk ends here.
            if pr.updated_at < window.start {
                break;
            }

            let author = pr.user.login.as_str();
            let is_member_pr = members.contains(author);

            // Staleness is measured against the current instant, not the
            // window end.
            if pr.state == "open" {
                let days_open = days_since(pr.created_at, now);
                if days_open > self.config.settings.stale_pr_days {
                    raw.stale_prs
                        .push(format!("{}#{} ({} days)", name, pr.number, days_open));
                }
            }

            if window.contains(pr.created_at) && is_member_pr {
                if let Some(activity) = member_activity.get_mut(author) {
                    activity.prs_opened += 1;
                }
                raw.pr_authors.insert(author.to_string());
            }

            if let Some(closed_at) = pr.closed_at {
                if pr.is_merged() && window.contains(closed_at) {
                    raw.merged_prs += 1;
                    if is_member_pr {
                        if let Some(activity) = member_activity.get_mut(author) {
                            activity.prs_merged += 1;
                        }
                    }
                    raw.cycle_times.push(hours_between(pr.created_at, closed_at));
                }
            }

            let reviews = self.source.reviews(owner, name, pr.number).await?;
            for review in reviews {
                let Some(user) = review.user else { continue };
                let Some(submitted_at) = review.submitted_at else {
                    continue;
                };
                if !window.contains(submitted_at) {
                    continue;
                }
                let reviewer = user.login.as_str();
                if members.contains(reviewer) {
                    if !leads.contains(reviewer) {
                        raw.non_lead_reviews += 1;
                    }
                    if let Some(activity) = member_activity.get_mut(reviewer) {
                        activity.reviews += 1;
                    }
                }
            }
        }

        Ok(())
    }

    async fn walk_issues(
        &self,
        owner: &str,
        name: &str,
        window: &ReportWindow,
        now: DateTime<Utc>,
        raw: &mut RawTeamMetrics,
    ) -> Result<(), ClientError> {
        let issues = self
            .source
            .issues_updated_since(owner, name, window.start)
            .await?;

        for issue in issues {
            // The issues API conflates PRs and issues
            if issue.is_pull_request() {
                continue;
            }

            if issue.state == "open" {
                let days_inactive = days_since(issue.updated_at, now);
                if days_inactive > self.config.settings.stale_issue_days {
                    raw.stale_issues.push(format!("{}#{}", name, issue.number));
                }
            }

            if let Some(closed_at) = issue.closed_at {
                if window.contains(closed_at) {
                    raw.issues_closed += 1;
                    if issue.has_label(&self.config.settings.npo_label) {
                        raw.npo_features_closed += 1;
                        raw.npo_time_to_close
                            .push(hours_between(issue.created_at, closed_at));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Derive the immutable report from one team's completed accumulator.
/// Pure and deterministic: identical input yields an identical report.
pub fn build_report(
    team_name: &str,
    team: &TeamConfig,
    raw: &RawTeamMetrics,
    window: &ReportWindow,
) -> TeamReport {
    TeamReport {
        team_name: team_name.to_string(),
        velocity: VelocityMetrics {
            merged_prs: raw.merged_prs,
            avg_cycle_time_hours: mean(&raw.cycle_times),
            issues_closed: raw.issues_closed,
        },
        participation: ParticipationMetrics {
            active_contributors: raw.pr_authors.len() as u32,
            total_members: team.members.len() as u32,
            participation_rate: participation_rate(raw.pr_authors.len(), team.members.len()),
            non_lead_reviews: raw.non_lead_reviews,
        },
        npo_impact: NpoMetrics {
            features_shipped: raw.npo_features_closed,
            avg_time_to_deliver_hours: mean(&raw.npo_time_to_close),
        },
        alerts: AlertMetrics {
            stale_prs: raw.stale_prs.clone(),
            stale_issues: raw.stale_issues.clone(),
        },
        start_date: window.start.date_naive().to_string(),
        end_date: window.end.date_naive().to_string(),
    }
}
