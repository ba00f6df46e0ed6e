// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Recommendation, RecommendationStatus};
use crate::store::Store;
use crate::summary;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("dismiss", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let mut rec = store.get::<Recommendation>(id)?;
            rec.status = RecommendationStatus::Dismissed;
            store.upsert(rec)?;
            println!("Dismissed recommendation '{}'", id);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            if store.delete::<Recommendation>(id)? {
                println!("Removed recommendation '{}'", id);
            } else {
                println!("No recommendation '{}' to remove", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let priority: u8 = sub
        .get_one::<String>("priority")
        .unwrap()
        .parse()
        .context("Field 'priority' must be an integer")?;
    let saved = store.upsert(Recommendation {
        id: sub.get_one::<String>("id").cloned().unwrap_or_default(),
        title: sub.get_one::<String>("title").unwrap().clone(),
        body: sub.get_one::<String>("body").unwrap().clone(),
        priority,
        subscription_id: sub.get_one::<String>("sub").cloned(),
        account_id: sub.get_one::<String>("account").cloned(),
        status: RecommendationStatus::Open,
    })?;
    println!("Added recommendation '{}' (p{})", saved.id, saved.priority);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let doc = store.load()?;
    let mut recs: Vec<&Recommendation> = if sub.get_flag("all") {
        doc.recommendations.iter().collect()
    } else {
        summary::open_recommendations(&doc)
    };
    recs.sort_by_key(|r| r.priority);

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &recs)? {
        return Ok(());
    }
    let rows = recs
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                format!("p{}", r.priority),
                r.title.clone(),
                r.subscription_id
                    .clone()
                    .or_else(|| r.account_id.clone())
                    .unwrap_or_default(),
                r.status.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Priority", "Title", "Ref", "Status"], rows)
    );
    Ok(())
}
