//! Product facets (brand, color, ...) and their values.

use serde::Serialize;

use crate::error::NormalizeError;
use crate::image::Image;
use crate::record::{FromRecord, Record};

/// Kind of attribute, encoded upstream as a single-letter tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttributeType {
    #[serde(rename = "C")]
    CheckboxUnique,
    #[serde(rename = "M")]
    CheckboxMultiple,
    #[serde(rename = "S")]
    ListText,
    #[serde(rename = "N")]
    ListNumber,
    #[serde(rename = "E")]
    ListBrand,
    #[serde(rename = "T")]
    FreeText,
    #[serde(rename = "O")]
    FreeNumber,
    #[serde(rename = "D")]
    FreeDate,
    #[serde(rename = "G")]
    Group,
}

impl AttributeType {
    #[must_use]
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::CheckboxUnique => "C",
            Self::CheckboxMultiple => "M",
            Self::ListText => "S",
            Self::ListNumber => "N",
            Self::ListBrand => "E",
            Self::FreeText => "T",
            Self::FreeNumber => "O",
            Self::FreeDate => "D",
            Self::Group => "G",
        }
    }
}

impl std::str::FromStr for AttributeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" => Ok(Self::CheckboxUnique),
            "M" => Ok(Self::CheckboxMultiple),
            "S" => Ok(Self::ListText),
            "N" => Ok(Self::ListNumber),
            "E" => Ok(Self::ListBrand),
            "T" => Ok(Self::FreeText),
            "O" => Ok(Self::FreeNumber),
            "D" => Ok(Self::FreeDate),
            "G" => Ok(Self::Group),
            other => Err(format!("unknown attribute type \"{other}\"")),
        }
    }
}

/// An attribute definition from `catalog/attributes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    id: i64,
    name: String,
    #[serde(rename = "type")]
    attribute_type: AttributeType,
    position: i64,
    parent_id: Option<i64>,
}

impl Attribute {
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn attribute_type(&self) -> AttributeType {
        self.attribute_type
    }

    #[must_use]
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Group this attribute is nested under, if any.
    #[must_use]
    pub fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }
}

impl FromRecord for Attribute {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: record.int("id")?,
            name: record.string("name")?,
            attribute_type: record.enumerated("type")?,
            position: record.int("position")?,
            parent_id: record.opt_int("parentId")?,
        })
    }
}

/// One selectable value of a list attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeVariant {
    id: i64,
    attribute_id: i64,
    name: String,
    slug: String,
    position: i64,
    image: Option<Image>,
}

impl AttributeVariant {
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub fn attribute_id(&self) -> i64 {
        self.attribute_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
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

impl FromRecord for AttributeVariant {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: record.int("id")?,
            attribute_id: record.int("attributeId")?,
            name: record.string("name")?,
            slug: record.string("slug")?,
            position: record.int_or("position", 0)?,
            image: record.opt_nested("image")?,
        })
    }
}

/// A resolved attribute value attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAttributeValue {
    id: i64,
    attribute_id: i64,
    name: String,
    slug: String,
    image: Option<Image>,
}

impl ProductAttributeValue {
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub fn attribute_id(&self) -> i64 {
        self.attribute_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }
}

impl From<AttributeVariant> for ProductAttributeValue {
    fn from(variant: AttributeVariant) -> Self {
        Self {
            id: variant.id,
            attribute_id: variant.attribute_id,
            name: variant.name,
            slug: variant.slug,
            image: variant.image,
        }
    }
}

impl FromRecord for ProductAttributeValue {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: record.int("id")?,
            attribute_id: record.int("attributeId")?,
            name: record.string("name")?,
            slug: record.string("slug")?,
            image: record.opt_nested("image")?,
        })
    }
}
