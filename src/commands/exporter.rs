// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Account, Budget, Recommendation, Subscription};
use crate::store::Store;
use anyhow::Result;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("subs", sub)) => export_subscriptions(store, sub),
        Some(("accounts", sub)) => export_accounts(store, sub),
        Some(("budgets", sub)) => export_budgets(store, sub),
        Some(("recs", sub)) => export_recommendations(store, sub),
        _ => Ok(()),
    }
}

fn write_json<T: serde::Serialize>(out: &str, items: &[T]) -> Result<()> {
    std::fs::write(out, serde_json::to_string_pretty(items)?)?;
    Ok(())
}

fn export_subscriptions(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let subs = store.list::<Subscription>()?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id", "name", "provider", "category", "plan", "monthly_cost", "renewal_date",
                "status", "tags", "notes",
            ])?;
            for s in &subs {
                wtr.write_record([
                    s.id.clone(),
                    s.name.clone(),
                    s.provider.clone(),
                    s.category.to_string(),
                    s.plan.clone().unwrap_or_default(),
                    s.monthly_cost.to_string(),
                    s.renewal_date.map(|d| d.to_string()).unwrap_or_default(),
                    s.status.to_string(),
                    s.tags.join(","),
                    s.notes.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => write_json(out, &subs)?,
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported subscriptions to {}", out);
    Ok(())
}

fn export_accounts(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let accounts = store.list::<Account>()?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "service_id", "email", "owner", "notes"])?;
            for a in &accounts {
                wtr.write_record([
                    a.id.clone(),
                    a.service_id.clone(),
                    a.email.clone(),
                    a.owner.clone().unwrap_or_default(),
                    a.notes.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => write_json(out, &accounts)?,
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported accounts to {}", out);
    Ok(())
}

fn export_budgets(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let budgets = store.list::<Budget>()?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "category", "period", "limit", "alert_threshold_percent"])?;
            for b in &budgets {
                wtr.write_record([
                    b.id.clone(),
                    b.category.to_string(),
                    b.period.clone(),
                    b.limit.to_string(),
                    b.alert_threshold_percent.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => write_json(out, &budgets)?,
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported budgets to {}", out);
    Ok(())
}

fn export_recommendations(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let recs = store.list::<Recommendation>()?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "title",
                "body",
                "priority",
                "subscription_id",
                "account_id",
                "status",
            ])?;
            for r in &recs {
                wtr.write_record([
                    r.id.clone(),
                    r.title.clone(),
                    r.body.clone(),
                    r.priority.to_string(),
                    r.subscription_id.clone().unwrap_or_default(),
                    r.account_id.clone().unwrap_or_default(),
                    r.status.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => write_json(out, &recs)?,
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported recommendations to {}", out);
    Ok(())
}
