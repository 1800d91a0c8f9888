//! Initial contact snapshot sources.
//!
//! # Responsibility
//! - Supply the one-shot, read-only startup snapshot.
//! - Reject malformed records before they reach the store.
//!
//! # Invariants
//! - Every returned contact starts with `is_favorite = false`.
//! - Returned ids are unique; later duplicates are dropped, first wins.

use crate::model::contact::{Contact, ContactId, ContactValidationError};
use log::warn;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type SourceResult<T> = Result<T, SourceError>;

/// Snapshot fetch error.
#[derive(Debug)]
pub enum SourceError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    InvalidRecord {
        id: ContactId,
        source: ContactValidationError,
    },
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read snapshot `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid snapshot json: {err}"),
            Self::InvalidRecord { id, source } => {
                write!(f, "invalid snapshot record {id}: {source}")
            }
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidRecord { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Startup data collaborator.
pub trait ContactSource {
    /// Returns the ordered startup snapshot.
    fn fetch(&self) -> SourceResult<Vec<Contact>>;
}

/// In-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    contacts: Vec<Contact>,
}

impl StaticSource {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl ContactSource for StaticSource {
    fn fetch(&self) -> SourceResult<Vec<Contact>> {
        normalize_snapshot(self.contacts.clone())
    }
}

/// JSON array of `{id, name, email, phone}` records.
#[derive(Debug, Clone)]
pub struct JsonSnapshotSource {
    raw: String,
}

impl JsonSnapshotSource {
    pub fn from_json(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Reads the whole file eagerly.
    pub fn from_path(path: impl AsRef<Path>) -> SourceResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { raw })
    }
}

impl ContactSource for JsonSnapshotSource {
    fn fetch(&self) -> SourceResult<Vec<Contact>> {
        let contacts: Vec<Contact> = serde_json::from_str(&self.raw)?;
        normalize_snapshot(contacts)
    }
}

/// Validates records, clears favorite flags and drops duplicate ids.
pub fn normalize_snapshot(contacts: Vec<Contact>) -> SourceResult<Vec<Contact>> {
    let total = contacts.len();
    let mut seen = HashSet::with_capacity(total);
    let mut normalized = Vec::with_capacity(total);

    for mut contact in contacts {
        contact
            .validate()
            .map_err(|source| SourceError::InvalidRecord {
                id: contact.id,
                source,
            })?;
        if !seen.insert(contact.id) {
            continue;
        }
        contact.is_favorite = false;
        normalized.push(contact);
    }

    let dropped = total - normalized.len();
    if dropped > 0 {
        warn!(
            "event=snapshot_dedup module=source status=warn dropped={} kept={}",
            dropped,
            normalized.len()
        );
    }

    Ok(normalized)
}
