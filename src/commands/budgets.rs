// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Budget, Category};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            if store.delete::<Budget>(id)? {
                println!("Removed budget '{}'", id);
            } else {
                println!("No budget '{}' to remove", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn set(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub
        .get_one::<String>("category")
        .unwrap()
        .parse::<Category>()
        .map_err(anyhow::Error::msg)?;
    let period = sub.get_one::<String>("period").unwrap().clone();
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;
    let threshold = parse_decimal(sub.get_one::<String>("threshold").unwrap())?;

    // One budget per category+period: re-setting overwrites in place.
    let existing_id = store
        .list::<Budget>()?
        .into_iter()
        .find(|b| b.category == category && b.period == period)
        .map(|b| b.id);

    let saved = store.upsert(Budget {
        id: existing_id.unwrap_or_default(),
        category,
        period: period.clone(),
        limit,
        alert_threshold_percent: threshold,
    })?;
    println!(
        "Budget set for {} / {} = {}",
        period,
        category,
        fmt_money(&saved.limit)
    );
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let budgets = store.list::<Budget>()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budgets)? {
        return Ok(());
    }
    let rows = budgets
        .iter()
        .map(|b| {
            vec![
                b.id.clone(),
                b.category.to_string(),
                b.period.clone(),
                fmt_money(&b.limit),
                format!("{}%", b.alert_threshold_percent),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Category", "Period", "Limit", "Alert at"], rows)
    );
    Ok(())
}
