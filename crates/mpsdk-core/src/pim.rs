//! Vendor-side product data (`products/{id}/declinations`).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::NormalizeError;
use crate::record::{FromRecord, Record};

/// Stock and pricing of one option combination of a vendor product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PimProductDeclination {
    #[serde(rename = "amount")]
    quantity: i64,
    #[serde(rename = "combination_code", skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(rename = "combination", serialize_with = "serialize_combination")]
    options_variants: BTreeMap<i64, i64>,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    crossed_out_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    affiliate_link: Option<String>,
}

impl PimProductDeclination {
    #[must_use]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Option id to variant id.
    #[must_use]
    pub fn options_variants(&self) -> &BTreeMap<i64, i64> {
        &self.options_variants
    }

    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    #[must_use]
    pub fn crossed_out_price(&self) -> Option<Decimal> {
        self.crossed_out_price
    }

    #[must_use]
    pub fn affiliate_link(&self) -> Option<&str> {
        self.affiliate_link.as_deref()
    }
}

impl FromRecord for PimProductDeclination {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            quantity: record.int("amount")?,
            code: record
                .opt_string("combination_code")?
                .filter(|code| !code.is_empty()),
            options_variants: record.int_map("combination")?,
            price: record.decimal("price")?,
            crossed_out_price: record
                .opt_decimal("crossed_out_price")?
                .filter(|price| !price.is_zero()),
            affiliate_link: record
                .opt_string("affiliate_link")?
                .filter(|link| !link.is_empty()),
        })
    }
}

fn serialize_combination<S: serde::Serializer>(
    combination: &BTreeMap<i64, i64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        combination
            .iter()
            .map(|(option, variant)| (option.to_string(), variant)),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::record::normalize;

    #[test]
    fn empty_values_are_absent() {
        let declination: PimProductDeclination = normalize(&json!({
            "amount": 4,
            "combination_code": "",
            "combination": {"1": 3, "2": 7},
            "price": "12.50",
            "crossed_out_price": 0.0,
            "affiliate_link": ""
        }))
        .unwrap();

        assert!(declination.code().is_none());
        assert!(declination.crossed_out_price().is_none());
        assert!(declination.affiliate_link().is_none());
        assert_eq!(declination.options_variants().get(&2), Some(&7));
        assert_eq!(declination.price(), Decimal::new(1250, 2));
    }

    #[test]
    fn present_values_are_kept() {
        let declination: PimProductDeclination = normalize(&json!({
            "amount": 4,
            "combination_code": "SKU-1",
            "combination": {},
            "price": 12,
            "crossed_out_price": 15,
            "affiliate_link": "https://example.com/p/1"
        }))
        .unwrap();

        assert_eq!(declination.code(), Some("SKU-1"));
        assert_eq!(declination.crossed_out_price(), Some(Decimal::new(15, 0)));
        assert_eq!(declination.affiliate_link(), Some("https://example.com/p/1"));
        assert!(declination.options_variants().is_empty());
    }

    #[test]
    fn combination_is_required() {
        let err = normalize::<PimProductDeclination>(&json!({"amount": 1, "price": 1})).unwrap_err();
        assert_eq!(err.key(), "combination");
    }

    #[test]
    fn combination_serializes_with_string_keys() {
        let declination: PimProductDeclination = normalize(&json!({
            "amount": 1, "combination": {"1": 3}, "price": 1
        }))
        .unwrap();
        let value = serde_json::to_value(&declination).unwrap();
        assert_eq!(value["combination"], json!({"1": 3}));
    }
}
