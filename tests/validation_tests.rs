// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use tempfile::TempDir;

use aiwatch::models::{
    Account, Budget, Category, Recommendation, RecommendationStatus, Subscription,
    SubscriptionStatus,
};
use aiwatch::store::{Store, StoreError};
use aiwatch::validation::ValidationError;

fn scratch_store() -> (TempDir, Store) {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path().join("aiwatch.json"));
    (dir, store)
}

fn sample_subscription() -> Subscription {
    Subscription {
        id: String::new(),
        name: "ChatGPT Plus".into(),
        provider: "OpenAI".into(),
        category: Category::General,
        plan: Some("Plus".into()),
        monthly_cost: Decimal::from(20),
        renewal_date: None,
        status: SubscriptionStatus::Active,
        tags: Vec::new(),
        notes: None,
    }
}

fn expect_validation(err: StoreError) -> ValidationError {
    match err {
        StoreError::Validation(v) => v,
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[test]
fn negative_monthly_cost_is_rejected() {
    let (_dir, store) = scratch_store();
    let mut sub = sample_subscription();
    sub.monthly_cost = Decimal::from(-1);
    let err = expect_validation(store.upsert(sub).unwrap_err());
    assert_eq!(err, ValidationError::NegativeAmount("monthly_cost"));
    assert!(store.list::<Subscription>().unwrap().is_empty());
}

#[test]
fn blank_name_is_rejected() {
    let (_dir, store) = scratch_store();
    let mut sub = sample_subscription();
    sub.name = "   ".into();
    let err = expect_validation(store.upsert(sub).unwrap_err());
    assert_eq!(err, ValidationError::EmptyField("name"));
}

#[test]
fn account_email_must_look_like_an_email() {
    let (_dir, store) = scratch_store();
    let sub = store.upsert(sample_subscription()).unwrap();
    let err = expect_validation(
        store
            .upsert(Account {
                id: String::new(),
                service_id: sub.id,
                email: "not-an-email".into(),
                owner: None,
                notes: None,
            })
            .unwrap_err(),
    );
    assert_eq!(err, ValidationError::InvalidEmail);
}

#[test]
fn account_must_reference_a_known_subscription() {
    let (_dir, store) = scratch_store();
    let err = expect_validation(
        store
            .upsert(Account {
                id: String::new(),
                service_id: "sub-404".into(),
                email: "owner@example.com".into(),
                owner: None,
                notes: None,
            })
            .unwrap_err(),
    );
    assert_eq!(err, ValidationError::UnknownSubscription("sub-404".into()));
}

#[test]
fn budget_threshold_cannot_exceed_100() {
    let (_dir, store) = scratch_store();
    let err = expect_validation(
        store
            .upsert(Budget {
                id: String::new(),
                category: Category::Coding,
                period: "monthly".into(),
                limit: Decimal::from(30),
                alert_threshold_percent: Decimal::from(101),
            })
            .unwrap_err(),
    );
    assert_eq!(err, ValidationError::ThresholdTooHigh);
}

#[test]
fn budget_limit_must_be_non_negative() {
    let (_dir, store) = scratch_store();
    let err = expect_validation(
        store
            .upsert(Budget {
                id: String::new(),
                category: Category::Coding,
                period: "monthly".into(),
                limit: Decimal::from(-5),
                alert_threshold_percent: Decimal::from(80),
            })
            .unwrap_err(),
    );
    assert_eq!(err, ValidationError::NegativeAmount("limit"));
}

#[test]
fn recommendation_needs_a_reference_and_a_sane_priority() {
    let (_dir, store) = scratch_store();
    let sub = store.upsert(sample_subscription()).unwrap();

    let orphan = Recommendation {
        id: String::new(),
        title: "When to use this".into(),
        body: "Use for deep coding sessions.".into(),
        priority: 1,
        subscription_id: None,
        account_id: None,
        status: RecommendationStatus::Open,
    };
    let err = expect_validation(store.upsert(orphan.clone()).unwrap_err());
    assert_eq!(err, ValidationError::MissingReference);

    let mut bad_priority = orphan.clone();
    bad_priority.subscription_id = Some(sub.id.clone());
    bad_priority.priority = 6;
    let err = expect_validation(store.upsert(bad_priority).unwrap_err());
    assert_eq!(err, ValidationError::PriorityOutOfRange);

    let mut dangling = orphan;
    dangling.subscription_id = Some("sub-404".into());
    let err = expect_validation(store.upsert(dangling).unwrap_err());
    assert_eq!(err, ValidationError::UnknownSubscription("sub-404".into()));
}
