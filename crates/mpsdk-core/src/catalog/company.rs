use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::NormalizeError;
use crate::image::Image;
use crate::record::{FromRecord, Record};

/// The vendor selling a declination, as embedded in catalog payloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    id: i64,
    name: String,
    slug: String,
    image: Option<Image>,
    #[serde(with = "rust_decimal::serde::float_option")]
    average_rating: Option<Decimal>,
}

impl CompanySummary {
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
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

    #[must_use]
    pub fn average_rating(&self) -> Option<Decimal> {
        self.average_rating
    }
}

impl FromRecord for CompanySummary {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: record.int("id")?,
            name: record.string("name")?,
            slug: record.string("slug")?,
            image: record.opt_nested("image")?,
            average_rating: record.opt_decimal("averageRating")?,
        })
    }
}

/// Public profile of a vendor, from `catalog/companies/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetail {
    id: i64,
    name: String,
    slug: String,
    description: String,
    zipcode: Option<String>,
    city: Option<String>,
    country: Option<String>,
    phone_number: Option<String>,
    image: Option<Image>,
    is_professional: bool,
    #[serde(with = "rust_decimal::serde::float_option")]
    average_rating: Option<Decimal>,
}

impl CompanyDetail {
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
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
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn zipcode(&self) -> Option<&str> {
        self.zipcode.as_deref()
    }

    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    #[must_use]
    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    #[must_use]
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn is_professional(&self) -> bool {
        self.is_professional
    }

    #[must_use]
    pub fn average_rating(&self) -> Option<Decimal> {
        self.average_rating
    }
}

impl FromRecord for CompanyDetail {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: record.int("id")?,
            name: record.string("name")?,
            slug: record.string("slug")?,
            description: record.string_or("description", "")?,
            zipcode: record.opt_string("zipcode")?,
            city: record.opt_string("city")?,
            country: record.opt_string("country")?,
            phone_number: record.opt_string("phoneNumber")?,
            image: record.opt_nested("image")?,
            is_professional: record.bool_or("isProfessional", false)?,
            average_rating: record.opt_decimal("averageRating")?,
        })
    }
}

/// One entry of the `catalog/companies` listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyListItem {
    id: i64,
    name: String,
    slug: String,
    description: String,
    zipcode: Option<String>,
    city: Option<String>,
    country: Option<String>,
    image: Option<Image>,
    is_professional: bool,
    #[serde(with = "rust_decimal::serde::float_option")]
    average_rating: Option<Decimal>,
}

impl CompanyListItem {
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
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
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn zipcode(&self) -> Option<&str> {
        self.zipcode.as_deref()
    }

    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    #[must_use]
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn is_professional(&self) -> bool {
        self.is_professional
    }

    #[must_use]
    pub fn average_rating(&self) -> Option<Decimal> {
        self.average_rating
    }
}

impl FromRecord for CompanyListItem {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: record.int("id")?,
            name: record.string("name")?,
            slug: record.string("slug")?,
            description: record.string_or("description", "")?,
            zipcode: record.opt_string("zipcode")?,
            city: record.opt_string("city")?,
            country: record.opt_string("country")?,
            image: record.opt_nested("image")?,
            is_professional: record.bool_or("isProfessional", false)?,
            average_rating: record.opt_decimal("averageRating")?,
        })
    }
}
