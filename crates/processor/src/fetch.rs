//! Spreadsheet fetch pipelines
//!
//! Each pipeline walks its domain's sheets in a fixed order, fetches the
//! configured range, parses it, and stores the typed record. Any error
//! aborts that pipeline; the caller records it as a pipeline failure.

use common::config::{FinanceConfig, RecruitmentConfig, SheetRange};
use common::models::{
    FinanceSummary, NpoContact, RecruitmentSummary, Sponsor, TrajectoryRow, TransactionRecord,
};
use common::{Error, Result, ResultStore};
use serde::Serialize;
use sheets::SheetsClient;
use tracing::info;

use crate::parse;

/// Finance sheets, in fetch order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinanceSheet {
    Summary,
    Trajectory,
    Transactions,
}

impl FinanceSheet {
    pub const ALL: [FinanceSheet; 3] = [
        FinanceSheet::Summary,
        FinanceSheet::Trajectory,
        FinanceSheet::Transactions,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FinanceSheet::Summary => "summary",
            FinanceSheet::Trajectory => "trajectory",
            FinanceSheet::Transactions => "transactions",
        }
    }

    fn range<'a>(&self, config: &'a FinanceConfig) -> &'a SheetRange {
        match self {
            FinanceSheet::Summary => &config.summary,
            FinanceSheet::Trajectory => &config.trajectory,
            FinanceSheet::Transactions => &config.transactions,
        }
    }
}

/// Recruitment sheets, in fetch order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecruitmentSheet {
    Summary,
    NpoCrm,
    SponsorsCrm,
}

impl RecruitmentSheet {
    pub const ALL: [RecruitmentSheet; 3] = [
        RecruitmentSheet::Summary,
        RecruitmentSheet::NpoCrm,
        RecruitmentSheet::SponsorsCrm,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RecruitmentSheet::Summary => "summary",
            RecruitmentSheet::NpoCrm => "npo_crm",
            RecruitmentSheet::SponsorsCrm => "sponsors_crm",
        }
    }

    fn range<'a>(&self, config: &'a RecruitmentConfig) -> &'a SheetRange {
        match self {
            RecruitmentSheet::Summary => &config.summary,
            RecruitmentSheet::NpoCrm => &config.npo_crm,
            RecruitmentSheet::SponsorsCrm => &config.sponsors_crm,
        }
    }
}

/// Parsed output of one finance sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FinanceRecord {
    Summary(FinanceSummary),
    Trajectory(Vec<TrajectoryRow>),
    Transactions(Vec<TransactionRecord>),
}

/// Parsed output of one recruitment sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecruitmentRecord {
    Summary(RecruitmentSummary),
    NpoCrm(Vec<NpoContact>),
    SponsorsCrm(Vec<Sponsor>),
}

/// Fetch one finance sheet and parse it into its record
pub async fn fetch_finance_sheet(
    client: &SheetsClient,
    config: &FinanceConfig,
    sheet: FinanceSheet,
) -> Result<FinanceRecord> {
    info!("Fetching finance sheet: {}", sheet.key());
    let range = sheet.range(config);
    let rows = client
        .get_values(&config.spreadsheet_id, &range.full_range())
        .await
        .map_err(|e| Error::Sheets(e.to_string()))?;
    info!(
        "Fetched {} rows for finance sheet: {}",
        rows.len(),
        sheet.key()
    );

    Ok(match sheet {
        FinanceSheet::Summary => FinanceRecord::Summary(parse::finance_summary(&rows)?),
        FinanceSheet::Trajectory => FinanceRecord::Trajectory(parse::finance_trajectory(&rows)),
        FinanceSheet::Transactions => FinanceRecord::Transactions(parse::transactions(&rows)),
    })
}

/// Fetch one recruitment sheet and parse it into its record
pub async fn fetch_recruitment_sheet(
    client: &SheetsClient,
    config: &RecruitmentConfig,
    sheet: RecruitmentSheet,
) -> Result<RecruitmentRecord> {
    info!("Fetching recruitment sheet: {}", sheet.key());
    let range = sheet.range(config);
    let rows = client
        .get_values(&config.spreadsheet_id, &range.full_range())
        .await
        .map_err(|e| Error::Sheets(e.to_string()))?;
    info!(
        "Fetched {} rows for recruitment sheet: {}",
        rows.len(),
        sheet.key()
    );

    Ok(match sheet {
        RecruitmentSheet::Summary => {
            RecruitmentRecord::Summary(parse::recruitment_summary(&rows))
        }
        RecruitmentSheet::NpoCrm => RecruitmentRecord::NpoCrm(parse::npo_crm(&rows)),
        RecruitmentSheet::SponsorsCrm => RecruitmentRecord::SponsorsCrm(parse::sponsor_crm(&rows)),
    })
}

/// Fetch and store every finance sheet
pub async fn run_finance_pipeline(
    client: &SheetsClient,
    config: &FinanceConfig,
    store: &ResultStore,
) -> Result<()> {
    for sheet in FinanceSheet::ALL {
        let record = fetch_finance_sheet(client, config, sheet).await?;
        store.put(&format!("finance/{}", sheet.key()), &record);
        info!("Completed finance sheet: {}", sheet.key());
    }
    Ok(())
}

/// Fetch and store every recruitment sheet
pub async fn run_recruitment_pipeline(
    client: &SheetsClient,
    config: &RecruitmentConfig,
    store: &ResultStore,
) -> Result<()> {
    for sheet in RecruitmentSheet::ALL {
        let record = fetch_recruitment_sheet(client, config, sheet).await?;
        store.put(&format!("recruitment/{}", sheet.key()), &record);
        info!("Completed recruitment sheet: {}", sheet.key());
    }
    Ok(())
}
