// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Account, Budget, Document, Recommendation, Subscription};
use crate::validation::{
    ValidationError, validate_account, validate_budget, validate_recommendation,
    validate_subscription,
};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Aiwatch", "aiwatch"));

/// Environment variable overriding the document file location, e.g. to
/// point at a mounted persistent volume.
pub const STORE_PATH_ENV: &str = "AIWATCH_DB";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("{path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Could not determine platform-specific data dir")]
    DataDir,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{collection} '{id}' was not found")]
    NotFound { collection: &'static str, id: String },
}

/// A record that lives in one of the document's collections.
pub trait Record: Clone + Serialize + DeserializeOwned {
    const COLLECTION: &'static str;
    const ID_PREFIX: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn collection(doc: &Document) -> &Vec<Self>;
    fn collection_mut(doc: &mut Document) -> &mut Vec<Self>;
    fn validate(&self, doc: &Document) -> Result<(), ValidationError>;
}

impl Record for Subscription {
    const COLLECTION: &'static str = "subscriptions";
    const ID_PREFIX: &'static str = "sub";

    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn collection(doc: &Document) -> &Vec<Self> {
        &doc.subscriptions
    }
    fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.subscriptions
    }
    fn validate(&self, _doc: &Document) -> Result<(), ValidationError> {
        validate_subscription(self)
    }
}

impl Record for Account {
    const COLLECTION: &'static str = "accounts";
    const ID_PREFIX: &'static str = "acc";

    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn collection(doc: &Document) -> &Vec<Self> {
        &doc.accounts
    }
    fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.accounts
    }
    fn validate(&self, doc: &Document) -> Result<(), ValidationError> {
        validate_account(self, doc)
    }
}

impl Record for Budget {
    const COLLECTION: &'static str = "budgets";
    const ID_PREFIX: &'static str = "bud";

    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn collection(doc: &Document) -> &Vec<Self> {
        &doc.budgets
    }
    fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.budgets
    }
    fn validate(&self, _doc: &Document) -> Result<(), ValidationError> {
        validate_budget(self)
    }
}

impl Record for Recommendation {
    const COLLECTION: &'static str = "recommendations";
    const ID_PREFIX: &'static str = "rec";

    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn collection(doc: &Document) -> &Vec<Self> {
        &doc.recommendations
    }
    fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.recommendations
    }
    fn validate(&self, doc: &Document) -> Result<(), ValidationError> {
        validate_recommendation(self, doc)
    }
}

/// Resolve the document file location: `AIWATCH_DB` when set, otherwise
/// the platform data directory.
pub fn store_path() -> Result<PathBuf, StoreError> {
    if let Ok(path) = std::env::var(STORE_PATH_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    let proj =
        directories::ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(StoreError::DataDir)?;
    Ok(proj.data_dir().join("aiwatch.json"))
}

/// Durable persistence of the whole application state as one JSON
/// document. Every mutating call is load -> mutate -> save; nothing is
/// cached between calls, so a completed save is visible to the next load.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Store::open(store_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document from disk. A missing file is a fresh empty
    /// document; a present-but-malformed file is a `Parse` error, never
    /// a panic.
    pub fn load(&self) -> Result<Document, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Document::default()),
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        serde_json::from_str(&raw).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Replace the on-disk document atomically: serialize, write to a
    /// sibling tmp path, rename over the target. A crash mid-write leaves
    /// either the old file or the new one, never a partial write.
    pub fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        let json = serde_json::to_string_pretty(doc).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            source: e,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }

    /// Create the document file if it does not exist yet.
    pub fn init(&self) -> Result<(), StoreError> {
        let doc = self.load()?;
        self.save(&doc)
    }

    pub fn list<T: Record>(&self) -> Result<Vec<T>, StoreError> {
        Ok(T::collection(&self.load()?).clone())
    }

    pub fn get<T: Record>(&self, id: &str) -> Result<T, StoreError> {
        let doc = self.load()?;
        T::collection(&doc)
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: T::COLLECTION,
                id: id.to_string(),
            })
    }

    /// Insert or replace a record by id. A record arriving with an empty
    /// id gets the next sequential one for its collection (`sub-1`,
    /// `acc-2`, ...). The record is validated against the current
    /// document before anything is written.
    pub fn upsert<T: Record>(&self, mut record: T) -> Result<T, StoreError> {
        let mut doc = self.load()?;
        if record.id().is_empty() {
            record.set_id(next_id::<T>(&doc));
        }
        record.validate(&doc)?;
        let records = T::collection_mut(&mut doc);
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        self.save(&doc)?;
        Ok(record)
    }

    /// Remove a record by id. Returns false (and writes nothing) when the
    /// id is absent. Removing a subscription or account also drops
    /// recommendations that referenced it; a subscription still used by
    /// an account cannot be removed.
    pub fn delete<T: Record>(&self, id: &str) -> Result<bool, StoreError> {
        let mut doc = self.load()?;
        if !T::collection(&doc).iter().any(|r| r.id() == id) {
            return Ok(false);
        }
        if T::COLLECTION == Subscription::COLLECTION {
            if doc.accounts.iter().any(|a| a.service_id == id) {
                return Err(ValidationError::SubscriptionInUse(id.to_string()).into());
            }
            doc.recommendations
                .retain(|r| r.subscription_id.as_deref() != Some(id));
        } else if T::COLLECTION == Account::COLLECTION {
            doc.recommendations
                .retain(|r| r.account_id.as_deref() != Some(id));
        }
        T::collection_mut(&mut doc).retain(|r| r.id() != id);
        self.save(&doc)?;
        Ok(true)
    }
}

fn next_id<T: Record>(doc: &Document) -> String {
    let max = T::collection(doc)
        .iter()
        .filter_map(|r| {
            r.id()
                .strip_prefix(T::ID_PREFIX)
                .and_then(|rest| rest.strip_prefix('-'))
                .and_then(|n| n.parse::<u64>().ok())
        })
        .max()
        .unwrap_or(0);
    format!("{}-{}", T::ID_PREFIX, max + 1)
}
