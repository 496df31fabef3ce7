//! Orders as exposed to vendors (`orders`, `orders/{id}`).
//!
//! These payloads keep the marketplace's storage layout: snake_case keys,
//! addresses flattened behind `s_`/`b_` prefixes, and line items and taxes
//! stored as objects keyed by their ids.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

use crate::date::denormalize_last_status_change;
use crate::error::NormalizeError;
use crate::order::OrderStatus;
use crate::record::{FromRecord, Record};

/// Reads the `timestamp` key as a Unix time in seconds.
fn created_at(record: &Record<'_>) -> Result<DateTime<Utc>, NormalizeError> {
    let seconds = record.int("timestamp")?;
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| record.malformed("timestamp", format!("{seconds} is out of range")))
}

fn last_status_change(record: &Record<'_>) -> Result<Option<DateTime<Utc>>, NormalizeError> {
    let key = "last_status_change";
    denormalize_last_status_change(&record.key_path(key), record.raw(key))
}

/// `"Y"`/`"N"` flags, also accepted as booleans.
fn yes_no(record: &Record<'_>, key: &str) -> Result<bool, NormalizeError> {
    match record.present(key) {
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::String(s)) if s == "Y" => Ok(true),
        Some(Value::String(s)) if s == "N" => Ok(false),
        Some(other) => Err(record.malformed(key, format!("expected \"Y\" or \"N\", found {other}"))),
        None => Err(record.malformed(key, "missing required key")),
    }
}

/// A vendor's view of one order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    order_id: i64,
    company_id: i64,
    #[serde(rename = "user_id")]
    customer_user_id: i64,
    basket_id: Option<String>,
    #[serde(rename = "email")]
    customer_email: String,
    #[serde(rename = "customer_firstname")]
    customer_first_name: String,
    #[serde(rename = "customer_lastname")]
    customer_last_name: String,
    #[serde(skip)]
    status: OrderStatus,
    #[serde(rename = "status")]
    status_code: String,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_seconds")]
    created_at: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    tax_subtotal: Decimal,
    #[serde(rename = "discount", with = "rust_decimal::serde::float")]
    discount_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    shipping_cost: Decimal,
    notes: String,
    invoice_number: String,
    #[serde(rename = "customer_comment")]
    comment: String,
    decline_reason: Option<String>,
    #[serde(rename = "need_shipping")]
    needs_shipping: bool,
    shipment_ids: Vec<i64>,
    #[serde(flatten)]
    shipping_address: OrderAddress,
    #[serde(flatten)]
    billing_address: OrderAddress,
    #[serde(rename = "products", serialize_with = "serialize_items")]
    items: Vec<OrderItem>,
    taxes: Vec<OrderTax>,
    last_status_change: Option<DateTime<Utc>>,
}

impl Order {
    #[must_use]
    pub fn order_id(&self) -> i64 {
        self.order_id
    }

    #[must_use]
    pub fn company_id(&self) -> i64 {
        self.company_id
    }

    #[must_use]
    pub fn customer_user_id(&self) -> i64 {
        self.customer_user_id
    }

    #[must_use]
    pub fn basket_id(&self) -> Option<&str> {
        self.basket_id.as_deref()
    }

    #[must_use]
    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    #[must_use]
    pub fn customer_first_name(&self) -> &str {
        &self.customer_first_name
    }

    #[must_use]
    pub fn customer_last_name(&self) -> &str {
        &self.customer_last_name
    }

    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    #[must_use]
    pub fn tax_subtotal(&self) -> Decimal {
        self.tax_subtotal
    }

    #[must_use]
    pub fn discount_amount(&self) -> Decimal {
        self.discount_amount
    }

    #[must_use]
    pub fn shipping_cost(&self) -> Decimal {
        self.shipping_cost
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Empty until the vendor assigns one.
    #[must_use]
    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    /// Free-text comment left by the customer at checkout.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    #[must_use]
    pub fn decline_reason(&self) -> Option<&str> {
        self.decline_reason.as_deref()
    }

    #[must_use]
    pub fn needs_shipping(&self) -> bool {
        self.needs_shipping
    }

    #[must_use]
    pub fn shipment_ids(&self) -> &[i64] {
        &self.shipment_ids
    }

    #[must_use]
    pub fn shipping_address(&self) -> &OrderAddress {
        &self.shipping_address
    }

    #[must_use]
    pub fn billing_address(&self) -> &OrderAddress {
        &self.billing_address
    }

    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    #[must_use]
    pub fn taxes(&self) -> &[OrderTax] {
        &self.taxes
    }

    #[must_use]
    pub fn last_status_change(&self) -> Option<DateTime<Utc>> {
        self.last_status_change
    }
}

impl FromRecord for Order {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        let status_code = record.string("status")?;
        Ok(Self {
            order_id: record.int("order_id")?,
            company_id: record.int("company_id")?,
            customer_user_id: record.int("user_id")?,
            basket_id: record.opt_string("basket_id")?,
            customer_email: record.string("email")?,
            customer_first_name: record.string("customer_firstname")?,
            customer_last_name: record.string("customer_lastname")?,
            status: record.enumerated("status")?,
            status_code,
            created_at: created_at(record)?,
            total: record.decimal("total")?,
            tax_subtotal: record.decimal_or("tax_subtotal", Decimal::ZERO)?,
            discount_amount: record.decimal_or("discount", Decimal::ZERO)?,
            shipping_cost: record.decimal_or("shipping_cost", Decimal::ZERO)?,
            notes: record.string_or("notes", "")?,
            invoice_number: record.string_or("invoice_number", "")?,
            comment: record.string_or("customer_comment", "")?,
            decline_reason: record.opt_string("decline_reason")?,
            needs_shipping: record.bool_or("need_shipping", true)?,
            shipment_ids: record.int_list_or_empty("shipment_ids")?,
            shipping_address: OrderAddress::from_prefixed(record, AddressKind::Shipping)?,
            billing_address: OrderAddress::from_prefixed(record, AddressKind::Billing)?,
            items: record.keyed("products")?,
            taxes: record.keyed_or_empty("taxes")?,
            last_status_change: last_status_change(record)?,
        })
    }
}

fn serialize_items<S: Serializer>(items: &[OrderItem], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(items.len()))?;
    for item in items {
        map.serialize_entry(&item.item_id.to_string(), item)?;
    }
    map.end()
}

/// The listing projection returned by `orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    order_id: i64,
    company_id: i64,
    #[serde(rename = "user_id")]
    customer_user_id: i64,
    basket_id: Option<String>,
    #[serde(rename = "email")]
    customer_email: String,
    #[serde(rename = "customer_firstname")]
    customer_first_name: String,
    #[serde(rename = "customer_lastname")]
    customer_last_name: String,
    #[serde(skip)]
    status: OrderStatus,
    #[serde(rename = "status")]
    status_code: String,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_seconds")]
    created_at: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    total: Decimal,
    last_status_change: Option<DateTime<Utc>>,
}

impl OrderSummary {
    #[must_use]
    pub fn order_id(&self) -> i64 {
        self.order_id
    }

    #[must_use]
    pub fn company_id(&self) -> i64 {
        self.company_id
    }

    #[must_use]
    pub fn customer_user_id(&self) -> i64 {
        self.customer_user_id
    }

    #[must_use]
    pub fn basket_id(&self) -> Option<&str> {
        self.basket_id.as_deref()
    }

    #[must_use]
    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    #[must_use]
    pub fn customer_first_name(&self) -> &str {
        &self.customer_first_name
    }

    #[must_use]
    pub fn customer_last_name(&self) -> &str {
        &self.customer_last_name
    }

    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    #[must_use]
    pub fn last_status_change(&self) -> Option<DateTime<Utc>> {
        self.last_status_change
    }
}

impl FromRecord for OrderSummary {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            order_id: record.int("order_id")?,
            company_id: record.int("company_id")?,
            customer_user_id: record.int("user_id")?,
            basket_id: record.opt_string("basket_id")?,
            customer_email: record.string("email")?,
            customer_first_name: record.string("customer_firstname")?,
            customer_last_name: record.string("customer_lastname")?,
            status: record.enumerated("status")?,
            status_code: record.string("status")?,
            created_at: created_at(record)?,
            total: record.decimal("total")?,
            last_status_change: last_status_change(record)?,
        })
    }
}

/// One product line of a vendor order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    item_id: i64,
    product_id: i64,
    #[serde(rename = "selected_code")]
    code: String,
    #[serde(rename = "supplier_ref")]
    supplier_reference: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(rename = "amount")]
    quantity: i64,
    #[serde(rename = "shipped_amount")]
    quantity_shipped: i64,
    #[serde(rename = "discount", with = "rust_decimal::serde::float")]
    discount_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    green_tax: Decimal,
    comment: String,
    #[serde(rename = "extra", serialize_with = "serialize_combinations")]
    combinations: BTreeMap<i64, i64>,
}

impl OrderItem {
    #[must_use]
    pub fn item_id(&self) -> i64 {
        self.item_id
    }

    #[must_use]
    pub fn product_id(&self) -> i64 {
        self.product_id
    }

    /// Code of the ordered declination.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn supplier_reference(&self) -> Option<&str> {
        self.supplier_reference.as_deref()
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
    pub fn quantity_shipped(&self) -> i64 {
        self.quantity_shipped
    }

    /// Units still waiting for a shipment; never negative.
    #[must_use]
    pub fn quantity_to_ship(&self) -> i64 {
        (self.quantity - self.quantity_shipped).max(0)
    }

    #[must_use]
    pub fn discount_amount(&self) -> Decimal {
        self.discount_amount
    }

    #[must_use]
    pub fn green_tax(&self) -> Decimal {
        self.green_tax
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Variant ids chosen for each option, in option id order.
    #[must_use]
    pub fn options_variants_ids(&self) -> Vec<i64> {
        self.combinations.values().copied().collect()
    }
}

impl FromRecord for OrderItem {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        let combinations = match record.opt_nested::<ItemExtra>("extra")? {
            Some(extra) => extra.combinations,
            None => BTreeMap::new(),
        };
        Ok(Self {
            item_id: record.int("item_id")?,
            product_id: record.int("product_id")?,
            code: record.string_or("selected_code", "")?,
            supplier_reference: record.opt_string("supplier_ref")?,
            price: record.decimal("price")?,
            quantity: record.int("amount")?,
            quantity_shipped: record.int_or("shipped_amount", 0)?,
            discount_amount: record.decimal_or("discount", Decimal::ZERO)?,
            green_tax: record.decimal_or("green_tax", Decimal::ZERO)?,
            comment: record.string_or("comment", "")?,
            combinations,
        })
    }
}

struct ItemExtra {
    combinations: BTreeMap<i64, i64>,
}

impl FromRecord for ItemExtra {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            combinations: record.opt_int_map("combinations")?.unwrap_or_default(),
        })
    }
}

fn serialize_combinations<S: Serializer>(
    combinations: &BTreeMap<i64, i64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    if combinations.is_empty() {
        map.serialize_entry("combinations", &Value::Null)?;
    } else {
        let entries: BTreeMap<String, i64> = combinations
            .iter()
            .map(|(option, variant)| (option.to_string(), *variant))
            .collect();
        map.serialize_entry("combinations", &entries)?;
    }
    map.end()
}

/// A tax line applied to a vendor order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderTax {
    description: String,
    #[serde(with = "rust_decimal::serde::float")]
    rate_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    tax_subtotal: Decimal,
    #[serde(serialize_with = "serialize_yes_no")]
    price_includes_tax: bool,
}

impl OrderTax {
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Percentage, e.g. `2.1` for 2.1 %.
    #[must_use]
    pub fn rate_value(&self) -> Decimal {
        self.rate_value
    }

    #[must_use]
    pub fn tax_subtotal(&self) -> Decimal {
        self.tax_subtotal
    }

    #[must_use]
    pub fn does_price_include_tax(&self) -> bool {
        self.price_includes_tax
    }
}

impl FromRecord for OrderTax {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            description: record.string("description")?,
            rate_value: record.decimal("rate_value")?,
            tax_subtotal: record.decimal("tax_subtotal")?,
            price_includes_tax: yes_no(record, "price_includes_tax")?,
        })
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_yes_no<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *flag { "Y" } else { "N" })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddressKind {
    Shipping,
    Billing,
}

impl AddressKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::Shipping => "s_",
            Self::Billing => "b_",
        }
    }
}

/// A postal address embedded in an order under an `s_` or `b_` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAddress {
    kind: AddressKind,
    title: Option<String>,
    first_name: String,
    last_name: String,
    company: String,
    address: String,
    complementary_address: String,
    zip_code: String,
    city: String,
    country_code: String,
    phone_number: String,
    pickup_point_id: Option<String>,
}

impl OrderAddress {
    fn from_prefixed(record: &Record<'_>, kind: AddressKind) -> Result<Self, NormalizeError> {
        let key = |name: &str| format!("{}{name}", kind.prefix());
        Ok(Self {
            kind,
            title: record.opt_string(&key("title"))?,
            first_name: record.string(&key("firstname"))?,
            last_name: record.string(&key("lastname"))?,
            company: record.string_or(&key("company"), "")?,
            address: record.string(&key("address"))?,
            complementary_address: record.string_or(&key("address_2"), "")?,
            zip_code: record.string(&key("zipcode"))?,
            city: record.string(&key("city"))?,
            country_code: record.string(&key("country"))?,
            phone_number: record.string_or(&key("phone"), "")?,
            pickup_point_id: record
                .opt_string(&key("pickup_point_id"))?
                .filter(|id| !id.is_empty()),
        })
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn company(&self) -> &str {
        &self.company
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn complementary_address(&self) -> &str {
        &self.complementary_address
    }

    #[must_use]
    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// ISO 3166-1 alpha-2 code.
    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    #[must_use]
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    #[must_use]
    pub fn pickup_point_id(&self) -> Option<&str> {
        self.pickup_point_id.as_deref()
    }
}

impl Serialize for OrderAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let prefix = self.kind.prefix();
        let mut map = serializer.serialize_map(None)?;
        if let Some(title) = &self.title {
            map.serialize_entry(&format!("{prefix}title"), title)?;
        }
        map.serialize_entry(&format!("{prefix}firstname"), &self.first_name)?;
        map.serialize_entry(&format!("{prefix}lastname"), &self.last_name)?;
        map.serialize_entry(&format!("{prefix}company"), &self.company)?;
        map.serialize_entry(&format!("{prefix}address"), &self.address)?;
        map.serialize_entry(&format!("{prefix}address_2"), &self.complementary_address)?;
        map.serialize_entry(&format!("{prefix}zipcode"), &self.zip_code)?;
        map.serialize_entry(&format!("{prefix}city"), &self.city)?;
        map.serialize_entry(&format!("{prefix}country"), &self.country_code)?;
        map.serialize_entry(&format!("{prefix}phone"), &self.phone_number)?;
        if let Some(pickup) = &self.pickup_point_id {
            map.serialize_entry(&format!("{prefix}pickup_point_id"), pickup)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[path = "vendor_test.rs"]
mod tests;
