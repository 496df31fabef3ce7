//! Shopping baskets.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::declination::{DeclinationId, DeclinationOption};
use crate::error::NormalizeError;
use crate::image::Image;
use crate::price::{to_legacy_float, Price};
use crate::record::{FromRecord, Record};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    id: String,
    coupons: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    total_discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    total_shipping: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    total_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    total: Decimal,
    total_quantity: i64,
    comment: String,
    items: Vec<BasketItem>,
}

impl Basket {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn coupons(&self) -> &[String] {
        &self.coupons
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    #[must_use]
    pub fn total_discount(&self) -> Decimal {
        self.total_discount
    }

    #[must_use]
    pub fn total_shipping(&self) -> Decimal {
        self.total_shipping
    }

    #[must_use]
    pub fn total_tax(&self) -> Decimal {
        self.total_tax
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    #[must_use]
    pub fn total_quantity(&self) -> i64 {
        self.total_quantity
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    #[must_use]
    pub fn items(&self) -> &[BasketItem] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, declination_id: &DeclinationId) -> Option<&BasketItem> {
        self.items.iter().find(|i| &i.declination_id == declination_id)
    }
}

impl FromRecord for Basket {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: record.string("id")?,
            coupons: record.string_list_or_empty("coupons")?,
            subtotal: record.decimal("subtotal")?,
            total_discount: record.decimal_or("totalDiscount", Decimal::ZERO)?,
            total_shipping: record.decimal_or("totalShipping", Decimal::ZERO)?,
            total_tax: record.decimal_or("totalTax", Decimal::ZERO)?,
            total: record.decimal("total")?,
            total_quantity: record.int("totalQuantity")?,
            comment: record.string_or("comment", "")?,
            items: record.list_or_empty("items")?,
        })
    }
}

/// One line of a basket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketItem {
    declination_id: DeclinationId,
    product_id: i64,
    product_name: String,
    product_code: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    crossed_out_price: Option<Decimal>,
    main_image: Option<Image>,
    quantity: i64,
    options: Vec<DeclinationOption>,
    comment: String,
    unit_price: Price,
    total_price: Price,
    #[serde(with = "rust_decimal::serde::float")]
    green_tax: Decimal,
    divisions: Vec<String>,
}

impl BasketItem {
    #[must_use]
    pub fn declination_id(&self) -> &DeclinationId {
        &self.declination_id
    }

    #[must_use]
    pub fn product_id(&self) -> i64 {
        self.product_id
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
    pub fn crossed_out_price(&self) -> Option<Decimal> {
        self.crossed_out_price
    }

    #[must_use]
    pub fn main_image(&self) -> Option<&Image> {
        self.main_image.as_ref()
    }

    #[must_use]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    #[must_use]
    pub fn options(&self) -> &[DeclinationOption] {
        &self.options
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    #[must_use]
    pub fn unit_price(&self) -> &Price {
        &self.unit_price
    }

    #[must_use]
    pub fn total_price(&self) -> &Price {
        &self.total_price
    }

    #[must_use]
    pub fn green_tax(&self) -> Decimal {
        self.green_tax
    }

    /// Division codes the item is restricted to.
    #[must_use]
    pub fn divisions(&self) -> &[String] {
        &self.divisions
    }

    #[deprecated(note = "use `unit_price().price_with_taxes()`")]
    #[must_use]
    pub fn individual_price(&self) -> f64 {
        to_legacy_float(self.unit_price.price_with_taxes())
    }

    #[deprecated(note = "use `total_price().price_with_taxes()`")]
    #[must_use]
    pub fn total(&self) -> f64 {
        to_legacy_float(self.total_price.price_with_taxes())
    }
}

impl FromRecord for BasketItem {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            declination_id: DeclinationId::new(record.string("declinationId")?),
            product_id: record.int("productId")?,
            product_name: record.string("productName")?,
            product_code: record.string("productCode")?,
            crossed_out_price: record.opt_decimal("crossedOutPrice")?,
            main_image: record.opt_nested("mainImage")?,
            quantity: record.int("quantity")?,
            options: record.list_or_empty("options")?,
            comment: record.string("comment")?,
            unit_price: record.nested("unitPrice")?,
            total_price: record.nested("totalPrice")?,
            green_tax: record.decimal_or("greenTax", Decimal::ZERO)?,
            divisions: record.string_list_or_empty("divisions")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::record::normalize;

    fn item_json() -> Value {
        json!({
            "declinationId": "8_1_1",
            "productId": 8,
            "productName": "Z11 Plus",
            "productCode": "978020137962",
            "crossedOutPrice": null,
            "mainImage": null,
            "quantity": 2,
            "comment": "",
            "unitPrice": {"priceWithoutVat": 66.5, "priceWithTaxes": 67.9, "vat": 1.4},
            "totalPrice": {"priceWithoutVat": 133, "priceWithTaxes": 135.8, "vat": 2.8}
        })
    }

    #[test]
    fn item_defaults() {
        let item: BasketItem = normalize(&item_json()).unwrap();
        assert_eq!(item.green_tax(), Decimal::ZERO);
        assert!(item.divisions().is_empty());
        assert!(item.options().is_empty());
        assert!(item.main_image().is_none());
    }

    #[test]
    #[allow(deprecated)]
    fn legacy_floats_follow_exact_prices() {
        let item: BasketItem = normalize(&item_json()).unwrap();
        assert_eq!(item.unit_price().price_with_taxes(), Decimal::new(679, 1));
        assert!((item.individual_price() - 67.9).abs() < f64::EPSILON);
        assert!((item.total() - 135.8).abs() < f64::EPSILON);
    }

    #[test]
    fn item_comment_is_required() {
        let mut raw = item_json();
        raw.as_object_mut().unwrap().remove("comment");
        assert_eq!(normalize::<BasketItem>(&raw).unwrap_err().key(), "comment");
    }

    #[test]
    fn basket_finds_item_by_declination() {
        let basket: Basket = normalize(&json!({
            "id": "c8512874-2a4a-4ed3-8e66-708c2fa54c1a",
            "subtotal": 135.8,
            "total": 135.8,
            "totalQuantity": 2,
            "items": [item_json()]
        }))
        .unwrap();
        assert_eq!(basket.total_shipping(), Decimal::ZERO);
        assert!(basket.coupons().is_empty());
        let item = basket.item(&DeclinationId::new("8_1_1")).unwrap();
        assert_eq!(item.quantity(), 2);
        assert!(basket.item(&DeclinationId::new("9_0")).is_none());
    }
}
