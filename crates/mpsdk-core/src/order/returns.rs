//! Returns a customer opens against one of their orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::DeclinationId;
use crate::error::{DomainError, NormalizeError};
use crate::record::{FromRecord, Record};

/// Progress of a return, carried as a one-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnStatus {
    Processing,
    Received,
    Declined,
    Completed,
}

impl ReturnStatus {
    #[must_use]
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Processing => "R",
            Self::Received => "A",
            Self::Declined => "D",
            Self::Completed => "C",
        }
    }
}

impl std::str::FromStr for ReturnStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" => Ok(Self::Processing),
            "A" => Ok(Self::Received),
            "D" => Ok(Self::Declined),
            "C" => Ok(Self::Completed),
            other => Err(format!("unknown return status \"{other}\"")),
        }
    }
}

impl Serialize for ReturnStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReturn {
    id: i64,
    order_id: i64,
    user_id: i64,
    created_at: DateTime<Utc>,
    comments: String,
    status: ReturnStatus,
    items: Vec<ReturnItem>,
}

impl OrderReturn {
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub fn order_id(&self) -> i64 {
        self.order_id
    }

    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn comments(&self) -> &str {
        &self.comments
    }

    #[must_use]
    pub fn status(&self) -> ReturnStatus {
        self.status
    }

    #[must_use]
    pub fn items(&self) -> &[ReturnItem] {
        &self.items
    }
}

impl FromRecord for OrderReturn {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        let raw = record.string("createdAt")?;
        let created_at = DateTime::parse_from_rfc3339(&raw)
            .map_err(|e| record.malformed("createdAt", format!("invalid date \"{raw}\": {e}")))?
            .with_timezone(&Utc);

        Ok(Self {
            id: record.int("id")?,
            order_id: record.int("orderId")?,
            user_id: record.int("userId")?,
            created_at,
            comments: record.string_or("comments", "")?,
            status: record.enumerated("status")?,
            items: record.list_or_empty("items")?,
        })
    }
}

/// One returned line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnItem {
    declination_id: DeclinationId,
    product_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    amount: i64,
    reason: i64,
}

impl ReturnItem {
    #[must_use]
    pub fn declination_id(&self) -> &DeclinationId {
        &self.declination_id
    }

    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Quantity returned.
    #[must_use]
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Id of the [`ReturnReason`] given for this line.
    #[must_use]
    pub fn reason(&self) -> i64 {
        self.reason
    }
}

impl FromRecord for ReturnItem {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            declination_id: DeclinationId::new(record.string("declinationId")?),
            product_name: record.string("productName")?,
            price: record.decimal("price")?,
            amount: record.int("amount")?,
            reason: record.int("reason")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnReason {
    id: i64,
    position: i64,
    name: String,
}

impl ReturnReason {
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub fn position(&self) -> i64 {
        self.position
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromRecord for ReturnReason {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: record.int("id")?,
            position: record.int_or("position", 0)?,
            name: record.string("name")?,
        })
    }
}

/// A line of a return request: which declination, how many, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnRequestItem {
    pub declination_id: DeclinationId,
    pub reason: i64,
    pub amount: i64,
}

/// Request to return some or all of the items of an order, sent as a form
/// to `user/orders/{id}/returns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderReturn {
    order_id: i64,
    comments: String,
    items: Vec<ReturnRequestItem>,
}

impl CreateOrderReturn {
    #[must_use]
    pub fn new(order_id: i64) -> Self {
        Self {
            order_id,
            comments: String::new(),
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    #[must_use]
    pub fn with_item(mut self, declination_id: DeclinationId, reason: i64, amount: i64) -> Self {
        self.items.push(ReturnRequestItem {
            declination_id,
            reason,
            amount,
        });
        self
    }

    #[must_use]
    pub fn order_id(&self) -> i64 {
        self.order_id
    }

    #[must_use]
    pub fn comments(&self) -> &str {
        &self.comments
    }

    #[must_use]
    pub fn items(&self) -> &[ReturnRequestItem] {
        &self.items
    }

    /// # Errors
    ///
    /// Returns [`DomainError::SomeParametersAreInvalid`] when no item is
    /// listed or an item asks for a non-positive quantity.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.items.is_empty() {
            return Err(DomainError::invalid_parameters(
                "At least one item must be returned",
            ));
        }
        if let Some(item) = self.items.iter().find(|item| item.amount <= 0) {
            return Err(DomainError::invalid_parameters(format!(
                "Invalid quantity {} for declination {}",
                item.amount,
                item.declination_id.as_str()
            )));
        }
        Ok(())
    }

    /// Form fields for the request, with items flattened as
    /// `items[i][field]`.
    #[must_use]
    pub fn form_fields(&self, user_id: i64) -> Vec<(String, String)> {
        let mut fields = vec![
            ("userId".to_owned(), user_id.to_string()),
            ("comments".to_owned(), self.comments.clone()),
        ];
        for (idx, item) in self.items.iter().enumerate() {
            fields.push((
                format!("items[{idx}][declinationId]"),
                item.declination_id.as_str().to_owned(),
            ));
            fields.push((format!("items[{idx}][reason]"), item.reason.to_string()));
            fields.push((format!("items[{idx}][amount]"), item.amount.to_string()));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::record::normalize;

    fn return_json() -> serde_json::Value {
        json!({
            "id": 12,
            "orderId": 5,
            "userId": 7,
            "createdAt": "2019-03-06T13:45:36+01:00",
            "status": "R",
            "items": [{
                "declinationId": "1_0",
                "productName": "Test product",
                "price": "9.90",
                "amount": 1,
                "reason": 2
            }]
        })
    }

    #[test]
    fn order_return_normalizes_items_and_date() {
        let order_return: OrderReturn = normalize(&return_json()).unwrap();

        assert_eq!(order_return.order_id(), 5);
        assert_eq!(order_return.comments(), "");
        assert_eq!(order_return.status(), ReturnStatus::Processing);
        assert_eq!(
            order_return.created_at(),
            Utc.timestamp_opt(1_551_876_336, 0).unwrap()
        );
        let item = &order_return.items()[0];
        assert_eq!(item.declination_id().as_str(), "1_0");
        assert_eq!(item.price(), Decimal::new(990, 2));
        assert_eq!(item.reason(), 2);
    }

    #[test]
    fn unknown_status_and_bad_date_are_malformed() {
        let mut raw = return_json();
        raw["status"] = json!("Z");
        assert_eq!(normalize::<OrderReturn>(&raw).unwrap_err().key(), "status");

        let mut raw = return_json();
        raw["createdAt"] = json!("yesterday");
        assert_eq!(normalize::<OrderReturn>(&raw).unwrap_err().key(), "createdAt");
    }

    #[test]
    fn return_reason_position_defaults_to_zero() {
        let reason: ReturnReason = normalize(&json!({"id": 1, "name": "Broken"})).unwrap();
        assert_eq!(reason.position(), 0);
        assert_eq!(reason.name(), "Broken");
    }

    #[test]
    fn empty_or_non_positive_request_is_rejected() {
        assert_eq!(
            CreateOrderReturn::new(5).validate(),
            Err(DomainError::SomeParametersAreInvalid(
                "At least one item must be returned".to_owned()
            ))
        );

        let zero = CreateOrderReturn::new(5).with_item(DeclinationId::new("1_0"), 2, 0);
        assert!(matches!(
            zero.validate(),
            Err(DomainError::SomeParametersAreInvalid(ref m)) if m.contains("1_0")
        ));
    }

    #[test]
    fn form_fields_flatten_items() {
        let command = CreateOrderReturn::new(5)
            .with_comments("Too big")
            .with_item(DeclinationId::new("1_0"), 2, 1)
            .with_item(DeclinationId::new("3_4_5"), 1, 2);

        let fields = command.form_fields(7);

        let expected: Vec<(String, String)> = [
            ("userId", "7"),
            ("comments", "Too big"),
            ("items[0][declinationId]", "1_0"),
            ("items[0][reason]", "2"),
            ("items[0][amount]", "1"),
            ("items[1][declinationId]", "3_4_5"),
            ("items[1][reason]", "1"),
            ("items[1][amount]", "2"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
        assert_eq!(fields, expected);
    }
}
