//! Shipping methods a vendor offers for one of their products
//! (`products/{id}/shippings`).

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::error::{DomainError, NormalizeError};
use crate::record::{FromRecord, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingStatus {
    Enabled,
    Disabled,
}

impl ShippingStatus {
    #[must_use]
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Enabled => "A",
            Self::Disabled => "D",
        }
    }
}

impl std::str::FromStr for ShippingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::Enabled),
            "D" => Ok(Self::Disabled),
            other => Err(format!("unknown shipping status \"{other}\"")),
        }
    }
}

impl Serialize for ShippingStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_code())
    }
}

/// Price of shipping: `amount` 0 is the first item, 1 each following one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShippingRate {
    pub amount: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

impl FromRecord for ShippingRate {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            amount: record.int("amount")?,
            value: record.decimal("value")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shipping {
    shipping_id: i64,
    name: String,
    status: ShippingStatus,
    delivery_time: String,
    rates: Vec<ShippingRate>,
    specific_rate: bool,
    product_id: i64,
}

impl Shipping {
    #[must_use]
    pub fn shipping_id(&self) -> i64 {
        self.shipping_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn status(&self) -> ShippingStatus {
        self.status
    }

    #[must_use]
    pub fn delivery_time(&self) -> &str {
        &self.delivery_time
    }

    #[must_use]
    pub fn rates(&self) -> &[ShippingRate] {
        &self.rates
    }

    /// Whether the product overrides the vendor's default rates.
    #[must_use]
    pub fn specific_rate(&self) -> bool {
        self.specific_rate
    }

    #[must_use]
    pub fn product_id(&self) -> i64 {
        self.product_id
    }
}

impl FromRecord for Shipping {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            shipping_id: record.int("shipping_id")?,
            name: record.string("name")?,
            status: record.enumerated("status")?,
            delivery_time: record.string_or("delivery_time", "")?,
            rates: record.list_or_empty("rates")?,
            specific_rate: record.bool_or("specific_rate", false)?,
            product_id: record.int("product_id")?,
        })
    }
}

/// New settings for one shipping method of a product, sent with
/// `PUT products/{product}/shippings/{shipping}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateShippingCommand {
    product_id: Option<i64>,
    status: Option<ShippingStatus>,
    rates: Vec<ShippingRate>,
    specific_rate: bool,
}

impl UpdateShippingCommand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_product_id(mut self, product_id: i64) -> Self {
        self.product_id = Some(product_id);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: ShippingStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_rates(mut self, rates: Vec<ShippingRate>) -> Self {
        self.rates = rates;
        self
    }

    #[must_use]
    pub fn with_specific_rate(mut self, specific_rate: bool) -> Self {
        self.specific_rate = specific_rate;
        self
    }

    #[must_use]
    pub fn product_id(&self) -> Option<i64> {
        self.product_id
    }

    /// # Errors
    ///
    /// Returns [`DomainError::SomeParametersAreInvalid`] for the first
    /// missing field: product id, status, then rates.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.product_id.is_none() {
            return Err(DomainError::invalid_parameters("Missing product ID"));
        }
        if self.status.is_none() {
            return Err(DomainError::invalid_parameters("Missing shipping status"));
        }
        if self.rates.is_empty() {
            return Err(DomainError::invalid_parameters("Missing shipping rates"));
        }
        Ok(())
    }

    #[must_use]
    pub fn payload(&self) -> UpdateShippingPayload<'_> {
        UpdateShippingPayload {
            status: self.status,
            rates: &self.rates,
            specific_rate: self.specific_rate,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateShippingPayload<'a> {
    status: Option<ShippingStatus>,
    rates: &'a [ShippingRate],
    specific_rate: bool,
}
