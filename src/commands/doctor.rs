// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use crate::utils::pretty_table;
use anyhow::Result;

/// Referential integrity sweep. The store only checks references at
/// write time, so later edits can leave danglers; this surfaces them
/// without failing.
pub fn handle(store: &Store) -> Result<()> {
    let doc = store.load()?;
    let mut rows = Vec::new();

    for account in &doc.accounts {
        if doc.subscription(&account.service_id).is_none() {
            rows.push(vec![
                "account_unknown_service".into(),
                format!("{} -> {}", account.id, account.service_id),
            ]);
        }
    }

    for rec in &doc.recommendations {
        if let Some(ref sub_id) = rec.subscription_id {
            if doc.subscription(sub_id).is_none() {
                rows.push(vec![
                    "recommendation_unknown_subscription".into(),
                    format!("{} -> {}", rec.id, sub_id),
                ]);
            }
        }
        if let Some(ref acc_id) = rec.account_id {
            if doc.account(acc_id).is_none() {
                rows.push(vec![
                    "recommendation_unknown_account".into(),
                    format!("{} -> {}", rec.id, acc_id),
                ]);
            }
        }
        if rec.subscription_id.is_none() && rec.account_id.is_none() {
            rows.push(vec!["recommendation_no_reference".into(), rec.id.clone()]);
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
