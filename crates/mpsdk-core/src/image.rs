use serde::Serialize;

use crate::error::NormalizeError;
use crate::record::{FromRecord, Record};

/// Reference to an image stored by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Image {
    id: i64,
}

impl Image {
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }
}

impl FromRecord for Image {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: record.int("id")?,
        })
    }
}
