// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Account, Budget, Document, Recommendation, Subscription};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{0}' must be a non-negative amount")]
    NegativeAmount(&'static str),
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),
    #[error("Field 'email' must look like an email address")]
    InvalidEmail,
    #[error("Unknown subscription '{0}'")]
    UnknownSubscription(String),
    #[error("Unknown account '{0}'")]
    UnknownAccount(String),
    #[error("Recommendation requires a subscription or an account reference")]
    MissingReference,
    #[error("Field 'priority' must be between 1 and 5")]
    PriorityOutOfRange,
    #[error("Field 'alert_threshold_percent' cannot be greater than 100")]
    ThresholdTooHigh,
    #[error("Subscription '{0}' is still used by an account")]
    SubscriptionInUse(String),
}

fn non_negative(value: Decimal, field: &'static str) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount(field));
    }
    Ok(())
}

fn non_empty(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub fn validate_subscription(sub: &Subscription) -> Result<(), ValidationError> {
    non_empty(&sub.name, "name")?;
    non_empty(&sub.provider, "provider")?;
    non_negative(sub.monthly_cost, "monthly_cost")?;
    Ok(())
}

pub fn validate_account(acc: &Account, doc: &Document) -> Result<(), ValidationError> {
    non_empty(&acc.service_id, "service_id")?;
    if !EMAIL_RE.is_match(&acc.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if doc.subscription(&acc.service_id).is_none() {
        return Err(ValidationError::UnknownSubscription(acc.service_id.clone()));
    }
    Ok(())
}

pub fn validate_budget(budget: &Budget) -> Result<(), ValidationError> {
    non_empty(&budget.period, "period")?;
    non_negative(budget.limit, "limit")?;
    non_negative(budget.alert_threshold_percent, "alert_threshold_percent")?;
    if budget.alert_threshold_percent > Decimal::ONE_HUNDRED {
        return Err(ValidationError::ThresholdTooHigh);
    }
    Ok(())
}

pub fn validate_recommendation(rec: &Recommendation, doc: &Document) -> Result<(), ValidationError> {
    non_empty(&rec.title, "title")?;
    non_empty(&rec.body, "body")?;
    if !(1..=5).contains(&rec.priority) {
        return Err(ValidationError::PriorityOutOfRange);
    }
    if rec.subscription_id.is_none() && rec.account_id.is_none() {
        return Err(ValidationError::MissingReference);
    }
    if let Some(ref sub_id) = rec.subscription_id {
        if doc.subscription(sub_id).is_none() {
            return Err(ValidationError::UnknownSubscription(sub_id.clone()));
        }
    }
    if let Some(ref acc_id) = rec.account_id {
        if doc.account(acc_id).is_none() {
            return Err(ValidationError::UnknownAccount(acc_id.clone()));
        }
    }
    Ok(())
}
