//! Orders as seen by the customer who placed them (`user/orders`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::declination::DeclinationId;
use crate::error::NormalizeError;
use crate::order::OrderStatus;
use crate::record::{FromRecord, Record};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrder {
    id: i64,
    company_id: i64,
    company_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    tax_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    total: Decimal,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_seconds")]
    created_at: DateTime<Utc>,
    status: OrderStatus,
    shipping_name: String,
    customer_comment: String,
    items: Vec<CustomerOrderItem>,
}

impl CustomerOrder {
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub fn company_id(&self) -> i64 {
        self.company_id
    }

    #[must_use]
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    #[must_use]
    pub fn tax_total(&self) -> Decimal {
        self.tax_total
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    #[must_use]
    pub fn shipping_name(&self) -> &str {
        &self.shipping_name
    }

    #[must_use]
    pub fn customer_comment(&self) -> &str {
        &self.customer_comment
    }

    #[must_use]
    pub fn items(&self) -> &[CustomerOrderItem] {
        &self.items
    }
}

impl FromRecord for CustomerOrder {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        let seconds = record.int("timestamp")?;
        let created_at = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| record.malformed("timestamp", format!("{seconds} is out of range")))?;
        Ok(Self {
            id: record.int("id")?,
            company_id: record.int("companyId")?,
            company_name: record.string_or("companyName", "")?,
            subtotal: record.decimal("subtotal")?,
            tax_total: record.decimal_or("taxTotal", Decimal::ZERO)?,
            total: record.decimal("total")?,
            created_at,
            status: record.enumerated("status")?,
            shipping_name: record.string_or("shippingName", "")?,
            customer_comment: record.string_or("customerComment", "")?,
            items: record.list_or_empty("items")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrderItem {
    declination_id: DeclinationId,
    product_name: String,
    product_code: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(rename = "amount")]
    quantity: i64,
    customer_comment: String,
}

impl CustomerOrderItem {
    #[must_use]
    pub fn declination_id(&self) -> &DeclinationId {
        &self.declination_id
    }

    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    #[must_use]
    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    #[must_use]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    #[must_use]
    pub fn customer_comment(&self) -> &str {
        &self.customer_comment
    }
}

impl FromRecord for CustomerOrderItem {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            declination_id: DeclinationId::new(record.string("declinationId")?),
            product_name: record.string("productName")?,
            product_code: record.string_or("productCode", "")?,
            price: record.decimal("price")?,
            quantity: record.int("amount")?,
            customer_comment: record.string_or("customerComment", "")?,
        })
    }
}
