//! Row parsers for the spreadsheet ranges
//!
//! Pure functions from fetched rows to typed records. List-shaped ranges
//! skip malformed rows with a warning; the dashboard summaries treat a
//! present-but-unparseable number as a parse error since a silent zero
//! would misreport totals.

use common::models::{
    CurrentGoal, FinanceSummary, NpoContact, RecruitmentSummary, Sponsor, TrajectoryRow,
    TransactionRecord,
};
use common::{Error, Result};
use tracing::warn;

use crate::cells::{to_float, to_float_or, to_int_or};

fn cell(row: &[String], index: usize) -> String {
    row.get(index).map(|c| c.trim().to_string()).unwrap_or_default()
}

/// Key/value lookup over a two-column dashboard range, keyed by the
/// lowercased label in the first column.
fn label_map(rows: &[Vec<String>]) -> Vec<(String, Vec<String>)> {
    rows.iter()
        .filter(|row| row.len() >= 2 && !row[0].trim().is_empty())
        .map(|row| (row[0].trim().to_lowercase(), row[1..].to_vec()))
        .collect()
}

fn lookup<'a>(kv: &'a [(String, Vec<String>)], label: &str) -> Option<&'a [String]> {
    kv.iter()
        .find(|(key, _)| key == label)
        .map(|(_, rest)| rest.as_slice())
}

/// Parse the finance dashboard range, e.g.
/// `["Total Budget", "1234.56"]` / `["Total Spent", "789.00"]` rows.
pub fn finance_summary(rows: &[Vec<String>]) -> Result<FinanceSummary> {
    let kv = label_map(rows);

    let number = |label: &str| -> Result<f64> {
        match lookup(&kv, label) {
            Some(rest) => to_float(&rest[0]).ok_or_else(|| {
                Error::Sheets(format!("unparseable '{}' cell: {:?}", label, rest[0]))
            }),
            None => Ok(0.0),
        }
    };

    let total_budget = number("total budget")?;
    let total_spent = number("total spent")?;
    let pending_reimbursements = number("pending reimbursements")?;

    let current_utilization = if total_budget != 0.0 {
        total_spent / total_budget
    } else {
        0.0
    };

    Ok(FinanceSummary {
        total_budget,
        total_spent,
        current_utilization,
        pending_reimbursements,
    })
}

/// Parse the weekly trajectory range:
/// Week | Week Ending | Actual Spend | Projected Spend | Variance | Top Spending Category
pub fn finance_trajectory(rows: &[Vec<String>]) -> Vec<TrajectoryRow> {
    let mut out = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        if row.len() < 6 {
            continue;
        }

        let week = match row[0].trim().parse::<i32>() {
            Ok(week) => week,
            Err(_) => {
                warn!("Skipping invalid trajectory row {}: {:?}", i, row);
                continue;
            }
        };
        let (Some(actual_spend), Some(projected_spend), Some(variance)) =
            (to_float(&row[2]), to_float(&row[3]), to_float(&row[4]))
        else {
            warn!("Skipping invalid trajectory row {}: {:?}", i, row);
            continue;
        };

        out.push(TrajectoryRow {
            week,
            week_ending: cell(row, 1),
            actual_spend,
            projected_spend,
            variance,
            top_spending_category: cell(row, 5),
        });
    }

    out
}

/// Parse the transactions ledger:
/// Date | Transaction ID | Description | Category | Stakeholder | Amount | Type | Status | Receipt Link
pub fn transactions(rows: &[Vec<String>]) -> Vec<TransactionRecord> {
    let mut out = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        if row.len() < 6 {
            continue;
        }

        let Some(amount) = to_float(&row[5]) else {
            warn!("Skipping invalid transaction row {}: {:?}", i, row);
            continue;
        };

        out.push(TransactionRecord {
            date: cell(row, 0),
            transaction_id: cell(row, 1),
            description: cell(row, 2),
            category: cell(row, 3),
            stakeholder: cell(row, 4),
            amount,
            kind: cell(row, 6),
            status: cell(row, 7),
            receipt_link: cell(row, 8),
        });
    }

    out
}

/// Parse the recruitment dashboard: label rows with current and goal
/// columns, e.g. `["NPOs Contacted", "50", "100"]`.
pub fn recruitment_summary(rows: &[Vec<String>]) -> RecruitmentSummary {
    let kv = label_map(rows);

    let counter = |label: &str| -> CurrentGoal<i64> {
        let rest = lookup(&kv, label).unwrap_or(&[]);
        CurrentGoal {
            current: to_int_or(rest.first().map(String::as_str).unwrap_or(""), 0),
            goal: to_int_or(rest.get(1).map(String::as_str).unwrap_or(""), 0),
        }
    };
    let amount = |label: &str| -> CurrentGoal<f64> {
        let rest = lookup(&kv, label).unwrap_or(&[]);
        CurrentGoal {
            current: to_float_or(rest.first().map(String::as_str).unwrap_or(""), 0.0),
            goal: to_float_or(rest.get(1).map(String::as_str).unwrap_or(""), 0.0),
        }
    };

    RecruitmentSummary {
        npos_contacted: counter("npos contacted"),
        npos_recruited: counter("npos recruited"),
        sponsors_contacted: counter("sponsors contacted"),
        sponsorship_secured: amount("sponsorship secured"),
        applications_received: counter("applications received"),
        challenges_submitted: counter("challenges submitted"),
    }
}

/// Parse the NPO CRM range:
/// NPO Name | Contact Name | Email | Status | Initial Contact | Last Contact | Source | LinkedIn | Website | Notes
pub fn npo_crm(rows: &[Vec<String>]) -> Vec<NpoContact> {
    let mut out = Vec::new();

    for row in rows {
        if row.len() < 10 {
            continue;
        }

        out.push(NpoContact {
            npo_name: cell(row, 0),
            contact_name: cell(row, 1),
            email: cell(row, 2),
            status: cell(row, 3),
            initial_contact_date: cell(row, 4),
            last_contact_date: cell(row, 5),
            source: cell(row, 6),
            linkedin: cell(row, 7),
            website: cell(row, 8),
            link_to_notes: cell(row, 9),
        });
    }

    out
}

/// Parse the sponsor CRM range:
/// Company | Source | Event | Contact Name | Contact Email | LinkedIn | Initial Contact | Last Contact | Pledged | Event Date | Notes
pub fn sponsor_crm(rows: &[Vec<String>]) -> Vec<Sponsor> {
    let mut out = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        if row.len() < 11 {
            continue;
        }

        let Some(pledged) = to_float(&row[8]) else {
            warn!("Skipping invalid sponsor row {}: {:?}", i, row);
            continue;
        };

        out.push(Sponsor {
            company: cell(row, 0),
            source: cell(row, 1),
            event_sponsored: cell(row, 2),
            contact_name: cell(row, 3),
            contact_email: cell(row, 4),
            linkedin: cell(row, 5),
            initial_contact_date: cell(row, 6),
            last_contact_date: cell(row, 7),
            pledged,
            event_date: cell(row, 9),
            link_to_notes: cell(row, 10),
        });
    }

    out
}
