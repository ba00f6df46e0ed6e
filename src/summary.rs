// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over a loaded document. Everything here is pure: no
//! storage access, no mutation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{
    Category, Document, Recommendation, RecommendationStatus, Subscription, SubscriptionStatus,
};

#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub budget_id: String,
    pub category: Category,
    pub period: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub over_budget: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetAlert {
    pub budget_id: String,
    pub category: Category,
    pub percent_used: Decimal,
}

/// The dashboard payload: totals, per-category breakdown, budget
/// statuses, and budgets that crossed their alert threshold.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_monthly_spend: Decimal,
    pub category_breakdown: BTreeMap<Category, Decimal>,
    pub budgets: Vec<BudgetStatus>,
    pub alerts: Vec<BudgetAlert>,
}

fn active(sub: &&Subscription) -> bool {
    sub.status == SubscriptionStatus::Active
}

/// Sum of monthly cost across active subscriptions.
pub fn total_monthly_spend(doc: &Document) -> Decimal {
    doc.subscriptions
        .iter()
        .filter(active)
        .map(|s| s.monthly_cost)
        .sum()
}

fn spent_in(doc: &Document, category: Category) -> Decimal {
    doc.subscriptions
        .iter()
        .filter(active)
        .filter(|s| s.category == category)
        .map(|s| s.monthly_cost)
        .sum()
}

/// Spend-vs-limit for every budget. `remaining` goes negative when a
/// category is over; a 0 limit with 0 spend is in budget with 0 left.
pub fn budget_status(doc: &Document) -> Vec<BudgetStatus> {
    doc.budgets
        .iter()
        .map(|b| {
            let spent = spent_in(doc, b.category);
            BudgetStatus {
                budget_id: b.id.clone(),
                category: b.category,
                period: b.period.clone(),
                limit: b.limit,
                spent,
                remaining: b.limit - spent,
                over_budget: spent > b.limit,
            }
        })
        .collect()
}

/// Recommendations still open, in insertion order.
pub fn open_recommendations(doc: &Document) -> Vec<&Recommendation> {
    doc.recommendations
        .iter()
        .filter(|r| r.status == RecommendationStatus::Open)
        .collect()
}

/// Active subscriptions renewing within `within_days` of `today`,
/// soonest first. `today` is a parameter so callers stay testable.
pub fn upcoming_renewals(doc: &Document, today: NaiveDate, within_days: i64) -> Vec<&Subscription> {
    let mut due: Vec<&Subscription> = doc
        .subscriptions
        .iter()
        .filter(active)
        .filter(|s| {
            s.renewal_date
                .is_some_and(|d| (d - today).num_days() >= 0 && (d - today).num_days() <= within_days)
        })
        .collect();
    due.sort_by_key(|s| s.renewal_date);
    due
}

pub fn summary(doc: &Document) -> Summary {
    let mut breakdown: BTreeMap<Category, Decimal> = Category::ALL
        .iter()
        .map(|c| (*c, Decimal::ZERO))
        .collect();
    for sub in doc.subscriptions.iter().filter(active) {
        *breakdown.entry(sub.category).or_default() += sub.monthly_cost;
    }

    let budgets = budget_status(doc);
    let alerts = doc
        .budgets
        .iter()
        .filter(|b| b.limit > Decimal::ZERO)
        .filter_map(|b| {
            let percent = spent_in(doc, b.category) / b.limit * Decimal::ONE_HUNDRED;
            (percent >= b.alert_threshold_percent).then(|| BudgetAlert {
                budget_id: b.id.clone(),
                category: b.category,
                percent_used: percent.round_dp(2),
            })
        })
        .collect();

    Summary {
        total_monthly_spend: total_monthly_spend(doc),
        category_breakdown: breakdown,
        budgets,
        alerts,
    }
}
