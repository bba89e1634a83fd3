// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerdash::config::Config;
use ledgerdash::display;
use ledgerdash::ledger::Ledger;
use ledgerdash::models::{MonthKey, Transaction};
use ledgerdash::{cli, commands::reports};
use rust_decimal_macros::dec;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()
}

fn ledger() -> Ledger {
    [
        ("2024-01-05", "1000", "Salary"),
        ("2024-01-10", "-200", "Groceries"),
        ("2024-02-01", "-50", "Entertainment"),
        ("2024-03-01", "1200", "Salary"),
        ("2024-03-03", "-300", "Rent"),
        ("2024-03-09", "-60", "Groceries"),
        ("2024-03-12", "-40", "Groceries"),
    ]
    .into_iter()
    .map(|(date, amount, category)| {
        Transaction::normalize(date, amount, category, "", today()).unwrap()
    })
    .collect()
}

fn report_matches(args: &[&str]) -> (String, clap::ArgMatches) {
    let mut argv = vec!["ledgerdash", "report"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("report", report_m)) = matches.subcommand() else {
        panic!("no report subcommand");
    };
    let Some((name, sub)) = report_m.subcommand() else {
        panic!("no report kind");
    };
    (name.to_string(), sub.clone())
}

#[test]
fn summary_rows_cover_each_month_with_savings() {
    let rows = reports::summary_rows(&ledger(), 12);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].month, MonthKey::new(2024, 1).unwrap());
    assert_eq!(rows[0].savings, dec!(800));
    assert_eq!(rows[0].savings_rate, dec!(0.8));
    assert_eq!(rows[1].income, dec!(0));
    assert_eq!(rows[1].savings_rate, dec!(0));
    assert_eq!(rows[2].expense, dec!(400));
    assert_eq!(rows[2].savings_rate, dec!(800) / dec!(1200));
}

#[test]
fn months_option_keeps_most_recent_months() {
    let (_, sub) = report_matches(&["cashflow", "--months", "2"]);
    let months = *sub.get_one::<usize>("months").unwrap();
    let rows = reports::cashflow_rows(&ledger(), months);
    let keys: Vec<String> = rows.iter().map(|r| r.month.to_string()).collect();
    assert_eq!(keys, vec!["2024-02", "2024-03"]);
}

#[test]
fn current_report_reference_month() {
    let (name, sub) = report_matches(&["current"]);
    assert_eq!(name, "current");
    assert_eq!(reports::reference_date(&sub, today()).unwrap(), today());

    let (_, sub) = report_matches(&["current", "--month", "2024-01"]);
    assert_eq!(
        reports::reference_date(&sub, today()).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    );

    let (_, sub) = report_matches(&["current", "--month", "January"]);
    assert!(reports::reference_date(&sub, today()).is_err());
}

#[test]
fn handlers_run_for_every_report_kind() {
    let ledger = ledger();
    let config = Config::default();
    for kind in ["balance", "cashflow", "categories", "current", "savings", "summary"] {
        let matches = cli::build_cli().get_matches_from(["ledgerdash", "report", kind, "--json"]);
        let Some(("report", report_m)) = matches.subcommand() else {
            panic!("no report subcommand");
        };
        reports::handle(&ledger, &config, report_m, today()).unwrap();
    }
    reports::handle(&Ledger::new(), &config, &report_matches_root(&["summary"]), today()).unwrap();
}

fn report_matches_root(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["ledgerdash", "report"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("report", report_m)) = matches.subcommand() else {
        panic!("no report subcommand");
    };
    report_m.clone()
}

#[test]
fn dashboard_renders_every_section() {
    let config = Config::default();
    let text = display::dashboard(&ledger(), today(), &config);
    for title in [
        "Balance Over Time",
        "Monthly Spending by Category",
        "Income vs Expenses",
        "Current Month Spending by Category (Total: ₹400.00)",
        "Monthly Savings Rate",
        "2024-03",
        "Excellent",
    ] {
        assert!(text.contains(title), "missing {:?} in\n{}", title, text);
    }

    let empty = display::dashboard(&Ledger::new(), today(), &config);
    assert!(empty.contains("No data available"));
    assert!(empty.contains("No expenses this month"));
}

#[test]
fn dashboard_handles_amounts_at_the_decimal_limit() {
    let huge = "79228162514264337593543950335";
    let ledger: Ledger = [
        ("2024-03-01", huge, "Salary"),
        ("2024-03-02", huge, "Salary"),
        ("2024-03-03", "-79228162514264337593543950335", "Rent"),
    ]
    .into_iter()
    .map(|(date, amount, category)| {
        Transaction::normalize(date, amount, category, "", today()).unwrap()
    })
    .collect();
    let text = display::dashboard(&ledger, today(), &Config::default());
    assert!(text.contains("₹79,228,162,514,264,337,593,543,950,335.00"));
    assert!(text.contains("Current Month Spending by Category"));
}
