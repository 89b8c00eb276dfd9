#[cfg(test)]
mod tests {
    use crate::parse::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    // finance_summary tests
    #[test]
    fn test_finance_summary_from_dashboard_rows() {
        let rows = rows(&[
            &["Total Budget", "$10,000"],
            &["Total Spent", "2,500.00"],
            &["Pending Reimbursements", "300"],
        ]);
        let summary = finance_summary(&rows).unwrap();

        assert_eq!(summary.total_budget, 10_000.0);
        assert_eq!(summary.total_spent, 2_500.0);
        assert!((summary.current_utilization - 0.25).abs() < 1e-9);
        assert_eq!(summary.pending_reimbursements, 300.0);
    }

    #[test]
    fn test_finance_summary_missing_labels_default_to_zero() {
        let summary = finance_summary(&rows(&[&["Something Else", "5"]])).unwrap();

        assert_eq!(summary.total_budget, 0.0);
        assert_eq!(summary.total_spent, 0.0);
        // No budget recorded: utilization must not divide by zero
        assert_eq!(summary.current_utilization, 0.0);
    }

    #[test]
    fn test_finance_summary_unparseable_total_is_an_error() {
        let result = finance_summary(&rows(&[&["Total Budget", "lots"]]));
        assert!(result.is_err());
    }

    #[test]
    fn test_finance_summary_labels_are_case_insensitive() {
        let summary = finance_summary(&rows(&[&["TOTAL BUDGET", "100"]])).unwrap();
        assert_eq!(summary.total_budget, 100.0);
    }

    // finance_trajectory tests
    #[test]
    fn test_trajectory_parses_complete_rows() {
        let rows = rows(&[
            &["1", "2026-01-09", "500", "450", "50", "Events"],
            &["2", "2026-01-16", "$1,200", "1000", "-200", "Travel"],
        ]);
        let trajectory = finance_trajectory(&rows);

        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory[0].week, 1);
        assert_eq!(trajectory[0].actual_spend, 500.0);
        assert_eq!(trajectory[0].top_spending_category, "Events");
        assert_eq!(trajectory[1].actual_spend, 1200.0);
    }

    #[test]
    fn test_trajectory_skips_short_and_malformed_rows() {
        let rows = rows(&[
            &["1", "2026-01-09", "500"],
            &["week", "ending", "actual", "projected", "variance", "category"],
            &["2", "2026-01-16", "800", "750", "50", "Food"],
        ]);
        let trajectory = finance_trajectory(&rows);

        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory[0].week, 2);
    }

    // transactions tests
    #[test]
    fn test_transactions_parse_with_optional_trailing_cells() {
        let rows = rows(&[
            &[
                "2026-01-05",
                "TX-1",
                "Venue deposit",
                "Events",
                "Platform",
                "$250.00",
                "Expense",
                "Cleared",
                "https://example.com/r/1",
            ],
            &["2026-01-06", "TX-2", "Pizza", "Food", "Outreach", "42.50"],
        ]);
        let records = transactions(&rows);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount, 250.0);
        assert_eq!(records[0].kind, "Expense");
        assert_eq!(records[1].amount, 42.5);
        assert_eq!(records[1].kind, "");
        assert_eq!(records[1].receipt_link, "");
    }

    #[test]
    fn test_transactions_skip_rows_without_amount() {
        let rows = rows(&[
            &["2026-01-05", "TX-1", "Venue", "Events", "Platform"],
            &["2026-01-06", "TX-2", "Pizza", "Food", "Outreach", "oops"],
            &["2026-01-07", "TX-3", "Domain", "Infra", "Platform", "12"],
        ]);
        let records = transactions(&rows);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].transaction_id, "TX-3");
    }

    // recruitment_summary tests
    #[test]
    fn test_recruitment_summary_current_and_goal_columns() {
        let rows = rows(&[
            &["NPOs Contacted", "50", "100"],
            &["NPOs Recruited", "30", "80"],
            &["Sponsors Contacted", "12"],
            &["Sponsorship Secured", "$5,000", "$20,000"],
            &["Applications Received", "200", "250"],
            &["Challenges Submitted", "90", "150"],
        ]);
        let summary = recruitment_summary(&rows);

        assert_eq!(summary.npos_contacted.current, 50);
        assert_eq!(summary.npos_contacted.goal, 100);
        // Goal column missing entirely
        assert_eq!(summary.sponsors_contacted.current, 12);
        assert_eq!(summary.sponsors_contacted.goal, 0);
        assert_eq!(summary.sponsorship_secured.current, 5_000.0);
        assert_eq!(summary.sponsorship_secured.goal, 20_000.0);
    }

    #[test]
    fn test_recruitment_summary_empty_range_is_all_zero() {
        let summary = recruitment_summary(&[]);
        assert_eq!(summary.npos_contacted.current, 0);
        assert_eq!(summary.sponsorship_secured.current, 0.0);
    }

    // CRM tests
    #[test]
    fn test_npo_crm_skips_short_rows() {
        let rows = rows(&[
            &[
                "Food Bank",
                "Dana",
                "dana@example.org",
                "Active",
                "2026-01-02",
                "2026-01-20",
                "Referral",
                "linkedin.com/in/dana",
                "foodbank.org",
                "notes://1",
            ],
            &["Shelter", "Max"],
        ]);
        let npos = npo_crm(&rows);

        assert_eq!(npos.len(), 1);
        assert_eq!(npos[0].npo_name, "Food Bank");
        assert_eq!(npos[0].source, "Referral");
        assert_eq!(npos[0].linkedin, "linkedin.com/in/dana");
        assert_eq!(npos[0].website, "foodbank.org");
    }

    #[test]
    fn test_sponsor_crm_parses_pledge_amount() {
        let rows = rows(&[&[
            "Acme Corp",
            "Cold outreach",
            "Hackathon",
            "Pat",
            "pat@acme.com",
            "linkedin.com/in/pat",
            "2026-01-02",
            "2026-01-15",
            "$2,500",
            "2026-03-01",
            "notes://2",
        ]]);
        let sponsors = sponsor_crm(&rows);

        assert_eq!(sponsors.len(), 1);
        assert_eq!(sponsors[0].pledged, 2_500.0);
        assert_eq!(sponsors[0].event_date, "2026-03-01");
    }

    #[test]
    fn test_sponsor_crm_skips_row_with_bad_pledge() {
        let rows = rows(&[&[
            "Acme Corp",
            "Cold outreach",
            "Hackathon",
            "Pat",
            "pat@acme.com",
            "linkedin.com/in/pat",
            "2026-01-02",
            "2026-01-15",
            "call us",
            "2026-03-01",
            "notes://2",
        ]]);
        assert!(sponsor_crm(&rows).is_empty());
    }
}
