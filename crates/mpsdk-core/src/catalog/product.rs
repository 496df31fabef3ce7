//! Catalog products, both the full view and the search-result projection.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::attribute::{AttributeType, ProductAttributeValue};
use crate::catalog::declination::Declination;
use crate::catalog::option::ProductOption;
use crate::error::NormalizeError;
use crate::image::Image;
use crate::record::{FromRecord, Record};

/// A full catalog product with its declinations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: i64,
    code: String,
    supplier_reference: String,
    name: String,
    slug: String,
    short_description: String,
    description: String,
    #[serde(with = "rust_decimal::serde::float")]
    min_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    green_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    average_rating: Option<Decimal>,
    attributes: Vec<ProductAttribute>,
    declinations: Vec<Declination>,
    options: Vec<ProductOption>,
}

impl Product {
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn supplier_reference(&self) -> &str {
        &self.supplier_reference
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
    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn min_price(&self) -> Decimal {
        self.min_price
    }

    #[must_use]
    pub fn green_tax(&self) -> Decimal {
        self.green_tax
    }

    #[must_use]
    pub fn average_rating(&self) -> Option<Decimal> {
        self.average_rating
    }

    #[must_use]
    pub fn attributes(&self) -> &[ProductAttribute] {
        &self.attributes
    }

    #[must_use]
    pub fn declinations(&self) -> &[Declination] {
        &self.declinations
    }

    #[must_use]
    pub fn options(&self) -> &[ProductOption] {
        &self.options
    }

    /// The first declination selected by exactly `variant_ids`.
    #[must_use]
    pub fn declination_with_variants(&self, variant_ids: &[i64]) -> Option<&Declination> {
        self.declinations
            .iter()
            .find(|d| d.has_variants(variant_ids))
    }

    /// The first top-level attribute of brand-list type.
    #[must_use]
    pub fn brand_attribute(&self) -> Option<&ProductAttribute> {
        self.attributes
            .iter()
            .find(|a| a.attribute_type == AttributeType::ListBrand)
    }
}

impl FromRecord for Product {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: record.int("id")?,
            code: record.string("code")?,
            supplier_reference: record.string("supplierReference")?,
            name: record.string("name")?,
            slug: record.string_or("slug", "")?,
            short_description: record.string_or("shortDescription", "")?,
            description: record.string_or("description", "")?,
            min_price: record.decimal("minPrice")?,
            green_tax: record.decimal_or("greenTax", Decimal::ZERO)?,
            average_rating: record.opt_decimal("averageRating")?,
            attributes: record.list_or_empty("attributes")?,
            declinations: record.list_or_empty("declinations")?,
            options: record.list_or_empty("options")?,
        })
    }
}

/// An attribute as embedded in a full product: values are given by name and
/// by variant id, but not as resolved variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAttribute {
    id: Option<i64>,
    name: String,
    #[serde(rename = "type")]
    attribute_type: AttributeType,
    value: Vec<String>,
    value_ids: Vec<i64>,
    children: Vec<ProductAttribute>,
}

impl ProductAttribute {
    #[must_use]
    pub fn id(&self) -> Option<i64> {
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
    pub fn value(&self) -> &[String] {
        &self.value
    }

    #[must_use]
    pub fn value_ids(&self) -> &[i64] {
        &self.value_ids
    }

    #[must_use]
    pub fn children(&self) -> &[ProductAttribute] {
        &self.children
    }
}

impl FromRecord for ProductAttribute {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: record.opt_int("id")?,
            name: record.string("name")?,
            attribute_type: record.enumerated("type")?,
            value: record.string_list_or_empty("value")?,
            value_ids: record.int_list_or_empty("valueIds")?,
            children: record.list_or_empty("children")?,
        })
    }
}

/// A product as returned by catalog search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    product_id: i64,
    name: String,
    subtitle: String,
    short_description: String,
    #[serde(with = "rust_decimal::serde::float")]
    minimum_price: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    crossed_out_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    green_tax: Decimal,
    is_available: bool,
    #[serde(with = "rust_decimal::serde::float_option")]
    average_rating: Option<Decimal>,
    main_image: Option<Image>,
    attributes: Vec<SummaryAttribute>,
}

impl ProductSummary {
    #[must_use]
    pub fn product_id(&self) -> i64 {
        self.product_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    #[must_use]
    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    #[must_use]
    pub fn minimum_price(&self) -> Decimal {
        self.minimum_price
    }

    #[must_use]
    pub fn crossed_out_price(&self) -> Option<Decimal> {
        self.crossed_out_price
    }

    #[must_use]
    pub fn green_tax(&self) -> Decimal {
        self.green_tax
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.is_available
    }

    #[must_use]
    pub fn average_rating(&self) -> Option<Decimal> {
        self.average_rating
    }

    #[must_use]
    pub fn main_image(&self) -> Option<&Image> {
        self.main_image.as_ref()
    }

    #[must_use]
    pub fn attributes(&self) -> &[SummaryAttribute] {
        &self.attributes
    }

    /// First value of the first brand-list attribute. Summaries embed
    /// resolved values, so no lookup is needed.
    #[must_use]
    pub fn brand(&self) -> Option<&ProductAttributeValue> {
        self.attributes
            .iter()
            .find(|a| a.attribute_type == AttributeType::ListBrand)?
            .values
            .first()
    }
}

impl FromRecord for ProductSummary {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            product_id: record.int("productId")?,
            name: record.string("name")?,
            subtitle: record.string_or("subtitle", "")?,
            short_description: record.string_or("shortDescription", "")?,
            minimum_price: record.decimal("minimumPrice")?,
            crossed_out_price: record.opt_decimal("crossedOutPrice")?,
            green_tax: record.decimal_or("greenTax", Decimal::ZERO)?,
            is_available: record.bool_or("isAvailable", true)?,
            average_rating: record.opt_decimal("averageRating")?,
            main_image: record.opt_nested("mainImage")?,
            attributes: record.list_or_empty("attributes")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryAttribute {
    id: i64,
    name: String,
    #[serde(rename = "type")]
    attribute_type: AttributeType,
    values: Vec<ProductAttributeValue>,
}

impl SummaryAttribute {
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
    pub fn values(&self) -> &[ProductAttributeValue] {
        &self.values
    }
}

impl FromRecord for SummaryAttribute {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: record.int("id")?,
            name: record.string("name")?,
            attribute_type: record.enumerated("type")?,
            values: record.list_or_empty("values")?,
        })
    }
}

/// Which shape of product a brand is resolved from.
#[derive(Debug, Clone, Copy)]
pub enum BrandSource<'a> {
    Summary(&'a ProductSummary),
    Full(&'a Product),
}

impl<'a> From<&'a ProductSummary> for BrandSource<'a> {
    fn from(summary: &'a ProductSummary) -> Self {
        Self::Summary(summary)
    }
}

impl<'a> From<&'a Product> for BrandSource<'a> {
    fn from(product: &'a Product) -> Self {
        Self::Full(product)
    }
}

#[cfg(test)]
#[path = "product_test.rs"]
mod tests;
