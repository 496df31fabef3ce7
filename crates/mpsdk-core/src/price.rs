//! Exact monetary amounts.
//!
//! Prices are held as [`Decimal`]; the `f64` values some older accessors
//! expose are always projected from the decimal, never stored alongside it.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::NormalizeError;
use crate::record::{FromRecord, Record};

/// A price broken down into its tax components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    #[serde(with = "rust_decimal::serde::float")]
    price_without_vat: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    price_with_taxes: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    vat: Decimal,
}

impl Price {
    #[must_use]
    pub fn price_without_vat(&self) -> Decimal {
        self.price_without_vat
    }

    #[must_use]
    pub fn price_with_taxes(&self) -> Decimal {
        self.price_with_taxes
    }

    #[must_use]
    pub fn vat(&self) -> Decimal {
        self.vat
    }
}

impl FromRecord for Price {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            price_without_vat: record.decimal("priceWithoutVat")?,
            price_with_taxes: record.decimal("priceWithTaxes")?,
            vat: record.decimal("vat")?,
        })
    }
}

/// Float projection of an exact amount, for consumers still on `f64`.
#[must_use]
pub fn to_legacy_float(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::record::normalize;

    #[test]
    fn price_normalizes_numeric_and_string_amounts() {
        let price: Price = normalize(&json!({
            "priceWithoutVat": "10.00",
            "priceWithTaxes": 12,
            "vat": 2.0
        }))
        .unwrap();
        assert_eq!(price.price_without_vat(), Decimal::new(10, 0));
        assert_eq!(price.price_with_taxes(), Decimal::new(12, 0));
        assert_eq!(price.vat(), Decimal::new(2, 0));
    }

    #[test]
    fn price_requires_every_component() {
        let err = normalize::<Price>(&json!({"priceWithoutVat": 1, "priceWithTaxes": 1}))
            .unwrap_err();
        assert_eq!(err.key(), "vat");
    }

    #[test]
    fn legacy_float_is_projected_from_decimal() {
        assert!((to_legacy_float(Decimal::new(6790, 2)) - 67.9).abs() < f64::EPSILON);
    }
}
