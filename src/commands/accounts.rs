// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Account;
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let record = Account {
                id: sub.get_one::<String>("id").cloned().unwrap_or_default(),
                service_id: sub.get_one::<String>("service").unwrap().clone(),
                email: sub.get_one::<String>("email").unwrap().clone(),
                owner: sub.get_one::<String>("owner").cloned(),
                notes: sub.get_one::<String>("notes").cloned(),
            };
            let saved = store.upsert(record)?;
            println!(
                "Added account '{}' ({} on {})",
                saved.id, saved.email, saved.service_id
            );
        }
        Some(("list", sub)) => {
            let mut accounts = store.list::<Account>()?;
            if let Some(service) = sub.get_one::<String>("service") {
                accounts.retain(|a| &a.service_id == service);
            }
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
                return Ok(());
            }
            let rows = accounts
                .iter()
                .map(|a| {
                    vec![
                        a.id.clone(),
                        a.service_id.clone(),
                        a.email.clone(),
                        a.owner.clone().unwrap_or_default(),
                        a.notes.clone().unwrap_or_default(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Id", "Service", "Email", "Owner", "Notes"], rows)
            );
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            if store.delete::<Account>(id)? {
                println!("Removed account '{}'", id);
            } else {
                println!("No account '{}' to remove", id);
            }
        }
        _ => {}
    }
    Ok(())
}
