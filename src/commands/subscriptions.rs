// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, Subscription, SubscriptionStatus};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table, split_tags};
use anyhow::Result;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("set-status", sub)) => set_status(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let record = Subscription {
        id: sub.get_one::<String>("id").cloned().unwrap_or_default(),
        name: sub.get_one::<String>("name").unwrap().clone(),
        provider: sub.get_one::<String>("provider").unwrap().clone(),
        category: sub.get_one::<String>("category").unwrap().parse::<Category>()
            .map_err(anyhow::Error::msg)?,
        plan: sub.get_one::<String>("plan").cloned(),
        monthly_cost: parse_decimal(sub.get_one::<String>("cost").unwrap())?,
        renewal_date: sub
            .get_one::<String>("renews")
            .map(|s| parse_date(s))
            .transpose()?,
        status: sub
            .get_one::<String>("status")
            .unwrap()
            .parse::<SubscriptionStatus>()
            .map_err(anyhow::Error::msg)?,
        tags: sub
            .get_one::<String>("tags")
            .map(|s| split_tags(s))
            .unwrap_or_default(),
        notes: sub.get_one::<String>("notes").cloned(),
    };
    let saved = store.upsert(record)?;
    println!(
        "Added subscription '{}' ({}, {}/mo)",
        saved.id,
        saved.name,
        fmt_money(&saved.monthly_cost)
    );
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.parse::<Category>())
        .transpose()
        .map_err(anyhow::Error::msg)?;
    let status = sub
        .get_one::<String>("status")
        .map(|s| s.parse::<SubscriptionStatus>())
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let mut subs = store.list::<Subscription>()?;
    if let Some(c) = category {
        subs.retain(|s| s.category == c);
    }
    if let Some(st) = status {
        subs.retain(|s| s.status == st);
    }

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &subs)? {
        return Ok(());
    }
    let rows = subs
        .iter()
        .map(|s| {
            vec![
                s.id.clone(),
                s.name.clone(),
                s.provider.clone(),
                s.category.to_string(),
                fmt_money(&s.monthly_cost),
                s.renewal_date.map(|d| d.to_string()).unwrap_or_default(),
                s.status.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Name", "Provider", "Category", "Cost/mo", "Renews", "Status"],
            rows
        )
    );
    Ok(())
}

fn set_status(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let status = sub
        .get_one::<String>("status")
        .unwrap()
        .parse::<SubscriptionStatus>()
        .map_err(anyhow::Error::msg)?;
    let mut record = store.get::<Subscription>(id)?;
    record.status = status;
    store.upsert(record)?;
    println!("Subscription '{}' is now {}", id, status);
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    if store.delete::<Subscription>(id)? {
        println!("Removed subscription '{}'", id);
    } else {
        println!("No subscription '{}' to remove", id);
    }
    Ok(())
}
