use serde::{Deserialize, Serialize};

use crate::core::LrError;
use crate::features::{LolFeature, PolFeature};

/// Art der Änderung am gespeicherten Datensatz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommitKind {
    Insert,
    Update,
    Delete,
}

/// Zu speichernder Datensatz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CommitRecord {
    Pol(PolFeature),
    Lol(LolFeature),
}

impl CommitRecord {
    pub fn is_valid(&self) -> bool {
        match self {
            CommitRecord::Pol(pol) => pol.is_valid,
            CommitRecord::Lol(lol) => lol.is_valid,
        }
    }

    pub fn last_error(&self) -> Option<LrError> {
        match self {
            CommitRecord::Pol(pol) => pol.last_error,
            CommitRecord::Lol(lol) => lol.last_error,
        }
    }

    fn set_data_fid(&mut self, pk: i64) {
        match self {
            CommitRecord::Pol(pol) => pol.data_fid = Some(pk),
            CommitRecord::Lol(lol) => lol.data_fid = Some(pk),
        }
    }
}

/// Speicher-Auftrag an den Host (Übergabe z.B. als JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRequest {
    pub kind: CommitKind,
    /// Primärschlüssel bei UPDATE / DELETE
    pub pk: Option<i64>,
    pub record: CommitRecord,
}

impl CommitRequest {
    pub fn insert(record: CommitRecord) -> Self {
        Self {
            kind: CommitKind::Insert,
            pk: None,
            record,
        }
    }

    pub fn update(pk: i64, mut record: CommitRecord) -> Self {
        record.set_data_fid(pk);
        Self {
            kind: CommitKind::Update,
            pk: Some(pk),
            record,
        }
    }

    pub fn delete(pk: i64, mut record: CommitRecord) -> Self {
        record.set_data_fid(pk);
        Self {
            kind: CommitKind::Delete,
            pk: Some(pk),
            record,
        }
    }

    /// Grund, warum der Auftrag nicht gespeichert werden darf.
    ///
    /// Löschen ist immer zulässig, INSERT/UPDATE nur mit gültigem Datensatz.
    pub fn invalid_reason(&self) -> Option<LrError> {
        if self.kind == CommitKind::Delete || self.record.is_valid() {
            return None;
        }
        Some(
            self.record
                .last_error()
                .unwrap_or(LrError::ReferenceFeatureInvalid),
        )
    }

    /// Serialisiert den Auftrag als JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
