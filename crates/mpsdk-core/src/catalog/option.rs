use serde::Serialize;

use crate::error::NormalizeError;
use crate::image::Image;
use crate::record::{FromRecord, Record};

/// A product option (e.g. size) and the variants it offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductOption {
    id: i64,
    name: String,
    code: Option<String>,
    position: i64,
    variants: Vec<OptionVariant>,
}

impl ProductOption {
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    #[must_use]
    pub fn position(&self) -> i64 {
        self.position
    }

    #[must_use]
    pub fn variants(&self) -> &[OptionVariant] {
        &self.variants
    }
}

impl FromRecord for ProductOption {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: record.int("id")?,
            name: record.string("name")?,
            code: record.opt_string("code")?,
            position: record.int("position")?,
            variants: record.list("variants")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionVariant {
    id: i64,
    name: String,
    position: i64,
    image: Option<Image>,
}

impl OptionVariant {
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn position(&self) -> i64 {
        self.position
    }

    #[must_use]
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }
}

impl FromRecord for OptionVariant {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: record.int("id")?,
            name: record.string("name")?,
            position: record.int_or("position", 0)?,
            image: record.opt_nested("image")?,
        })
    }
}
