// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use crate::summary;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    let doc = store.load()?;
    let report = summary::summary(&doc);

    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    println!(
        "Total monthly spend: {}",
        fmt_money(&report.total_monthly_spend)
    );

    let breakdown = report
        .category_breakdown
        .iter()
        .map(|(cat, amount)| vec![cat.to_string(), fmt_money(amount)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spend/mo"], breakdown));

    if !report.budgets.is_empty() {
        let rows = report
            .budgets
            .iter()
            .map(|b| {
                vec![
                    b.category.to_string(),
                    b.period.clone(),
                    fmt_money(&b.limit),
                    fmt_money(&b.spent),
                    fmt_money(&b.remaining),
                    if b.over_budget { "OVER" } else { "ok" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Period", "Limit", "Spent", "Remaining", ""],
                rows
            )
        );
    }

    for alert in &report.alerts {
        println!(
            "⚠ budget '{}' ({}) at {}% of its limit",
            alert.budget_id, alert.category, alert.percent_used
        );
    }

    let today = chrono::Local::now().date_naive();
    let due = summary::upcoming_renewals(&doc, today, 7);
    for sub in due {
        if let Some(date) = sub.renewal_date {
            println!("Renews soon: {} ({}) on {}", sub.name, sub.id, date);
        }
    }
    Ok(())
}
