//! Domain models

use serde::Serialize;

// --- Weekly GitHub report ---

/// Velocity block of a team report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VelocityMetrics {
    pub merged_prs: u32,
    /// Mean PR open→merge time; 0.0 when nothing merged
    pub avg_cycle_time_hours: f64,
    pub issues_closed: u32,
}

/// Participation block of a team report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipationMetrics {
    pub active_contributors: u32,
    pub total_members: u32,
    /// Percentage 0–100 (can exceed 100 if non-roster duplicates are configured)
    pub participation_rate: f64,
    pub non_lead_reviews: u32,
}

/// NPO-impact block of a team report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NpoMetrics {
    pub features_shipped: u32,
    /// Mean issue open→close time for labeled features; 0.0 when none shipped
    pub avg_time_to_deliver_hours: f64,
}

/// Alert block of a team report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertMetrics {
    /// `"repo#number (N days)"` descriptors
    pub stale_prs: Vec<String>,
    /// `"repo#number"` descriptors
    pub stale_issues: Vec<String>,
}

/// One team's weekly report. Built once per run, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamReport {
    pub team_name: String,
    pub velocity: VelocityMetrics,
    pub participation: ParticipationMetrics,
    pub npo_impact: NpoMetrics,
    pub alerts: AlertMetrics,
    /// ISO date of the window start
    pub start_date: String,
    /// ISO date of the window end
    pub end_date: String,
}

// --- Finance spreadsheet records ---

/// Totals from the finance dashboard range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinanceSummary {
    pub total_budget: f64,
    pub total_spent: f64,
    /// spent / budget; 0.0 when no budget is recorded
    pub current_utilization: f64,
    pub pending_reimbursements: f64,
}

/// One row of the weekly spend trajectory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryRow {
    pub week: i32,
    pub week_ending: String,
    pub actual_spend: f64,
    pub projected_spend: f64,
    pub variance: f64,
    pub top_spending_category: String,
}

/// One ledger row from the transactions range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub date: String,
    pub transaction_id: String,
    pub description: String,
    pub category: String,
    pub stakeholder: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub receipt_link: String,
}

// --- Recruitment spreadsheet records ---

/// A current-vs-goal counter pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentGoal<T> {
    pub current: T,
    pub goal: T,
}

/// Totals from the recruitment dashboard range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecruitmentSummary {
    pub npos_contacted: CurrentGoal<i64>,
    pub npos_recruited: CurrentGoal<i64>,
    pub sponsors_contacted: CurrentGoal<i64>,
    pub sponsorship_secured: CurrentGoal<f64>,
    pub applications_received: CurrentGoal<i64>,
    pub challenges_submitted: CurrentGoal<i64>,
}

/// One row of the NPO CRM range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NpoContact {
    pub npo_name: String,
    pub contact_name: String,
    pub email: String,
    pub status: String,
    pub initial_contact_date: String,
    pub last_contact_date: String,
    pub source: String,
    pub website: String,
    pub linkedin: String,
    pub link_to_notes: String,
}

/// One row of the sponsor CRM range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sponsor {
    pub company: String,
    pub source: String,
    pub event_sponsored: String,
    pub contact_name: String,
    pub contact_email: String,
    pub linkedin: String,
    pub initial_contact_date: String,
    pub last_contact_date: String,
    pub pledged: f64,
    pub event_date: String,
    pub link_to_notes: String,
}
