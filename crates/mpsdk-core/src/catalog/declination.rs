//! Purchasable variants of catalog products.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::company::CompanySummary;
use crate::error::NormalizeError;
use crate::image::Image;
use crate::record::{FromRecord, Record};

/// Composite identifier of a declination: the product id followed by the
/// option/variant ids that select it, joined with `_` (e.g. `"1_3_7"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DeclinationId(String);

impl DeclinationId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The product part of the identifier, when it is numeric.
    #[must_use]
    pub fn product_id(&self) -> Option<i64> {
        self.0.split('_').next()?.parse().ok()
    }
}

impl std::fmt::Display for DeclinationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One option → variant choice that defines a declination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclinationOption {
    option_id: i64,
    option_name: String,
    option_code: Option<String>,
    variant_id: i64,
    variant_name: String,
    image: Option<Image>,
}

impl DeclinationOption {
    #[must_use]
    pub fn option_id(&self) -> i64 {
        self.option_id
    }

    #[must_use]
    pub fn option_name(&self) -> &str {
        &self.option_name
    }

    #[must_use]
    pub fn option_code(&self) -> Option<&str> {
        self.option_code.as_deref()
    }

    #[must_use]
    pub fn variant_id(&self) -> i64 {
        self.variant_id
    }

    #[must_use]
    pub fn variant_name(&self) -> &str {
        &self.variant_name
    }

    #[must_use]
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }
}

impl FromRecord for DeclinationOption {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            option_id: record.int("optionId")?,
            option_name: record.string("optionName")?,
            option_code: record.opt_string("optionCode")?,
            variant_id: record.int("variantId")?,
            variant_name: record.string("variantName")?,
            image: record.opt_nested("image")?,
        })
    }
}

/// A shipping method available for a declination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclinationShipping {
    shipping_id: i64,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    first_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    next_rate: Decimal,
    delivery_time: String,
}

impl DeclinationShipping {
    #[must_use]
    pub fn shipping_id(&self) -> i64 {
        self.shipping_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rate charged for the first unit.
    #[must_use]
    pub fn first_rate(&self) -> Decimal {
        self.first_rate
    }

    /// Rate charged for each additional unit.
    #[must_use]
    pub fn next_rate(&self) -> Decimal {
        self.next_rate
    }

    #[must_use]
    pub fn delivery_time(&self) -> &str {
        &self.delivery_time
    }
}

impl FromRecord for DeclinationShipping {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            shipping_id: record.int("shippingId")?,
            name: record.string("name")?,
            first_rate: record.decimal("firstRate")?,
            next_rate: record.decimal("nextRate")?,
            delivery_time: record.string_or("deliveryTime", "")?,
        })
    }
}

/// A purchasable variant of a catalog product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Declination {
    id: DeclinationId,
    code: String,
    supplier_reference: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    original_price: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    crossed_out_price: Option<Decimal>,
    #[serde(skip)]
    price_with_taxes: Decimal,
    #[serde(skip)]
    price_without_vat: Decimal,
    #[serde(skip)]
    vat: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    green_tax: Decimal,
    amount: i64,
    affiliate_link: Option<String>,
    images: Vec<Image>,
    is_brand_new: bool,
    options: Vec<DeclinationOption>,
    company: CompanySummary,
    is_available: bool,
    infinite_stock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    shippings: Option<Vec<DeclinationShipping>>,
}

impl Declination {
    #[must_use]
    pub fn id(&self) -> &DeclinationId {
        &self.id
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
    pub fn price(&self) -> Decimal {
        self.price
    }

    #[must_use]
    pub fn original_price(&self) -> Decimal {
        self.original_price
    }

    #[must_use]
    pub fn crossed_out_price(&self) -> Option<Decimal> {
        self.crossed_out_price
    }

    /// Falls back to [`Self::price`] when the payload carries no breakdown.
    #[must_use]
    pub fn price_with_taxes(&self) -> Decimal {
        self.price_with_taxes
    }

    /// Falls back to [`Self::price`] when the payload carries no breakdown.
    #[must_use]
    pub fn price_without_vat(&self) -> Decimal {
        self.price_without_vat
    }

    #[must_use]
    pub fn vat(&self) -> Decimal {
        self.vat
    }

    #[must_use]
    pub fn green_tax(&self) -> Decimal {
        self.green_tax
    }

    /// Units in stock.
    #[must_use]
    pub fn amount(&self) -> i64 {
        self.amount
    }

    #[must_use]
    pub fn affiliate_link(&self) -> Option<&str> {
        self.affiliate_link.as_deref()
    }

    #[must_use]
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    /// `true` for new goods, `false` for second-hand.
    #[must_use]
    pub fn is_brand_new(&self) -> bool {
        self.is_brand_new
    }

    #[must_use]
    pub fn options(&self) -> &[DeclinationOption] {
        &self.options
    }

    #[must_use]
    pub fn company(&self) -> &CompanySummary {
        &self.company
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.is_available
    }

    #[must_use]
    pub fn has_infinite_stock(&self) -> bool {
        self.infinite_stock
    }

    #[must_use]
    pub fn shippings(&self) -> Option<&[DeclinationShipping]> {
        self.shippings.as_deref()
    }

    /// Whether this declination is selected by exactly `variant_ids`.
    ///
    /// Both sides are compared as sets: the result is `true` only when every
    /// requested id belongs to the declination and the declination has no
    /// variant outside the request. Subsets and supersets do not match.
    #[must_use]
    pub fn has_variants(&self, variant_ids: &[i64]) -> bool {
        let own: HashSet<i64> = self.options.iter().map(|o| o.variant_id).collect();
        let requested: HashSet<i64> = variant_ids.iter().copied().collect();

        let found = requested.iter().filter(|id| own.contains(id)).count();
        found == requested.len() && requested.len() == own.len()
    }
}

impl FromRecord for Declination {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        let price = record.decimal("price")?;

        // The tax breakdown is optional; each component falls back on its own.
        let (price_with_taxes, price_without_vat, vat) =
            match record.opt_nested::<PriceBreakdown>("prices")? {
                Some(p) => (
                    p.price_with_taxes.unwrap_or(price),
                    p.price_without_vat.unwrap_or(price),
                    p.vat.unwrap_or(Decimal::ZERO),
                ),
                None => (price, price, Decimal::ZERO),
            };

        Ok(Self {
            id: DeclinationId::new(record.string("id")?),
            code: record.string("code")?,
            supplier_reference: record.string("supplierReference")?,
            price,
            original_price: record.decimal("originalPrice")?,
            crossed_out_price: record.opt_decimal("crossedOutPrice")?,
            price_with_taxes,
            price_without_vat,
            vat,
            green_tax: record.decimal_or("greenTax", Decimal::ZERO)?,
            amount: record.int("amount")?,
            affiliate_link: record.opt_string("affiliateLink")?,
            images: record.list("images")?,
            is_brand_new: record.bool_or("isBrandNew", true)?,
            options: record.list("options")?,
            company: record.nested("company")?,
            is_available: record.bool("isAvailable")?,
            infinite_stock: record.bool("infiniteStock")?,
            shippings: record.opt_list("shippings")?,
        })
    }
}

struct PriceBreakdown {
    price_with_taxes: Option<Decimal>,
    price_without_vat: Option<Decimal>,
    vat: Option<Decimal>,
}

impl FromRecord for PriceBreakdown {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            price_with_taxes: record.opt_decimal("priceWithTaxes")?,
            price_without_vat: record.opt_decimal("priceWithoutVat")?,
            vat: record.opt_decimal("vat")?,
        })
    }
}

#[cfg(test)]
#[path = "declination_test.rs"]
mod tests;
