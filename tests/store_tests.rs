// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use tempfile::TempDir;

use aiwatch::models::{
    Account, Category, Document, Recommendation, RecommendationStatus, Subscription,
    SubscriptionStatus,
};
use aiwatch::store::{Store, StoreError};

fn scratch_store() -> (TempDir, Store) {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path().join("aiwatch.json"));
    (dir, store)
}

fn sample_subscription() -> Subscription {
    Subscription {
        id: String::new(),
        name: "Claude Code Pro".into(),
        provider: "Anthropic".into(),
        category: Category::Coding,
        plan: Some("Pro".into()),
        monthly_cost: Decimal::from(17),
        renewal_date: None,
        status: SubscriptionStatus::Active,
        tags: vec!["coding".into()],
        notes: None,
    }
}

fn sample_account(service_id: &str) -> Account {
    Account {
        id: String::new(),
        service_id: service_id.into(),
        email: "builder@example.com".into(),
        owner: Some("me".into()),
        notes: None,
    }
}

#[test]
fn load_missing_file_yields_empty_document() {
    let (_dir, store) = scratch_store();
    let doc = store.load().unwrap();
    assert_eq!(doc, Document::default());
    assert!(doc.subscriptions.is_empty());
    assert!(doc.accounts.is_empty());
    assert!(doc.budgets.is_empty());
    assert!(doc.recommendations.is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let (_dir, store) = scratch_store();
    let mut doc = Document::default();
    let mut sub = sample_subscription();
    sub.id = "sub-1".into();
    doc.subscriptions.push(sub);
    store.save(&doc).unwrap();
    assert_eq!(store.load().unwrap(), doc);
}

#[test]
fn save_leaves_no_tmp_file_behind() {
    let (dir, store) = scratch_store();
    store.save(&Document::default()).unwrap();
    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["aiwatch.json".to_string()]);
}

#[test]
fn upsert_assigns_sequential_ids_and_reads_back() {
    let (_dir, store) = scratch_store();
    let first = store.upsert(sample_subscription()).unwrap();
    let second = store.upsert(sample_subscription()).unwrap();
    assert_eq!(first.id, "sub-1");
    assert_eq!(second.id, "sub-2");
    assert_eq!(store.get::<Subscription>("sub-1").unwrap(), first);
    assert_eq!(store.list::<Subscription>().unwrap().len(), 2);
}

#[test]
fn upsert_with_existing_id_overwrites() {
    let (_dir, store) = scratch_store();
    let mut sub = store.upsert(sample_subscription()).unwrap();
    sub.status = SubscriptionStatus::Cancelled;
    store.upsert(sub.clone()).unwrap();
    let listed = store.list::<Subscription>().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, SubscriptionStatus::Cancelled);
}

#[test]
fn delete_nonexistent_returns_false_and_changes_nothing() {
    let (_dir, store) = scratch_store();
    store.upsert(sample_subscription()).unwrap();
    let before = store.load().unwrap();
    assert!(!store.delete::<Account>("nonexistent").unwrap());
    assert_eq!(store.load().unwrap(), before);
}

#[test]
fn delete_returns_true_when_a_record_was_removed() {
    let (_dir, store) = scratch_store();
    let sub = store.upsert(sample_subscription()).unwrap();
    assert!(store.delete::<Subscription>(&sub.id).unwrap());
    assert!(store.list::<Subscription>().unwrap().is_empty());
}

#[test]
fn delete_subscription_used_by_account_is_rejected() {
    let (_dir, store) = scratch_store();
    let sub = store.upsert(sample_subscription()).unwrap();
    store.upsert(sample_account(&sub.id)).unwrap();
    let err = store.delete::<Subscription>(&sub.id).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.list::<Subscription>().unwrap().len(), 1);
}

#[test]
fn delete_account_drops_its_recommendations() {
    let (_dir, store) = scratch_store();
    let sub = store.upsert(sample_subscription()).unwrap();
    let acc = store.upsert(sample_account(&sub.id)).unwrap();
    store
        .upsert(Recommendation {
            id: String::new(),
            title: "Coding workflow".into(),
            body: "Use this account for multi-file edits.".into(),
            priority: 1,
            subscription_id: None,
            account_id: Some(acc.id.clone()),
            status: RecommendationStatus::Open,
        })
        .unwrap();
    assert!(store.delete::<Account>(&acc.id).unwrap());
    assert!(store.list::<Recommendation>().unwrap().is_empty());
}

#[test]
fn get_unknown_id_is_not_found() {
    let (_dir, store) = scratch_store();
    let err = store.get::<Subscription>("sub-9").unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotFound {
            collection: "subscriptions",
            ..
        }
    ));
}

#[test]
fn malformed_json_is_a_parse_error_not_a_panic() {
    let (dir, _) = scratch_store();
    let path = dir.path().join("aiwatch.json");
    std::fs::write(&path, "{ not json").unwrap();
    let store = Store::open(&path);
    assert!(matches!(store.load().unwrap_err(), StoreError::Parse { .. }));
}

#[test]
fn missing_collections_deserialize_as_empty() {
    let (dir, _) = scratch_store();
    let path = dir.path().join("aiwatch.json");
    std::fs::write(&path, r#"{"subscriptions": []}"#).unwrap();
    let doc = Store::open(&path).load().unwrap();
    assert!(doc.accounts.is_empty());
    assert!(doc.budgets.is_empty());
    assert!(doc.recommendations.is_empty());
}

#[test]
fn init_creates_the_file_with_all_collections() {
    let (dir, store) = scratch_store();
    store.init().unwrap();
    let raw = std::fs::read_to_string(dir.path().join("aiwatch.json")).unwrap();
    let val: serde_json::Value = serde_json::from_str(&raw).unwrap();
    for key in ["subscriptions", "accounts", "budgets", "recommendations"] {
        assert_eq!(val[key], serde_json::json!([]));
    }
}

#[test]
fn upsert_then_aggregate_sees_the_new_record() {
    let (_dir, store) = scratch_store();
    let mut sub = store.upsert(sample_subscription()).unwrap();
    let doc = store.load().unwrap();
    assert_eq!(aiwatch::summary::total_monthly_spend(&doc), Decimal::from(17));

    sub.status = SubscriptionStatus::Cancelled;
    store.upsert(sub).unwrap();
    let doc = store.load().unwrap();
    assert_eq!(aiwatch::summary::total_monthly_spend(&doc), Decimal::ZERO);
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path().join("nested").join("data").join("aiwatch.json"));
    store.save(&Document::default()).unwrap();
    assert!(store.load().unwrap().subscriptions.is_empty());
}
