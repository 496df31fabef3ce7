//! Anonymous shopping baskets (`basket/...`).

use mpsdk_core::catalog::DeclinationId;
use mpsdk_core::{normalize, Basket, FromRecord, NormalizeError, Record};
use serde_json::Value;

use crate::error::ClientError;
use crate::http::{HttpClient, RequestOptions};
use crate::services::{segment, RemapStatus};

pub struct BasketService<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> BasketService<'a, C> {
    #[must_use]
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Creates an empty basket and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Normalize`] if the server does not answer with a
    /// string id.
    pub async fn create_basket(&self) -> Result<String, ClientError> {
        match self.client.post("basket", RequestOptions::new()).await? {
            Value::String(id) => Ok(id),
            other => Err(NormalizeError::MalformedPayload {
                key: "$".to_owned(),
                reason: format!("expected a basket id, found {other}"),
            }
            .into()),
        }
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown basket.
    pub async fn basket(&self, basket_id: &str) -> Result<Basket, ClientError> {
        let body = self
            .client
            .get(&format!("basket/{}", segment(basket_id)), RequestOptions::new())
            .await
            .or_not_found(|| not_found(basket_id))?;
        Ok(normalize(&body)?)
    }

    /// Adds `quantity` units of a declination and returns how many were
    /// actually added (stock permitting).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown basket.
    pub async fn add_product(
        &self,
        basket_id: &str,
        declination_id: &DeclinationId,
        quantity: u32,
    ) -> Result<i64, ClientError> {
        let options = RequestOptions::new()
            .with_form("declinationId", declination_id.as_str())
            .with_form("quantity", quantity.to_string());
        self.quantity_change(basket_id, "add", options).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown basket.
    pub async fn remove_product(
        &self,
        basket_id: &str,
        declination_id: &DeclinationId,
    ) -> Result<(), ClientError> {
        let options = RequestOptions::new().with_form("declinationId", declination_id.as_str());
        self.client
            .post(&basket_path(basket_id, "remove"), options)
            .await
            .or_not_found(|| not_found(basket_id))?;
        Ok(())
    }

    /// Sets the quantity of a declination and returns the resulting quantity.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown basket.
    pub async fn update_product_quantity(
        &self,
        basket_id: &str,
        declination_id: &DeclinationId,
        quantity: u32,
    ) -> Result<i64, ClientError> {
        let options = RequestOptions::new()
            .with_form("declinationId", declination_id.as_str())
            .with_form("quantity", quantity.to_string());
        self.quantity_change(basket_id, "modify", options).await
    }

    async fn quantity_change(
        &self,
        basket_id: &str,
        action: &str,
        options: RequestOptions,
    ) -> Result<i64, ClientError> {
        let body = self
            .client
            .post(&basket_path(basket_id, action), options)
            .await
            .or_not_found(|| not_found(basket_id))?;
        let QuantityResponse(quantity) = normalize(&body)?;
        Ok(quantity)
    }
}

fn basket_path(basket_id: &str, action: &str) -> String {
    format!("basket/{}/{action}", segment(basket_id))
}

fn not_found(basket_id: &str) -> String {
    format!("basket {basket_id} not found")
}

struct QuantityResponse(i64);

impl FromRecord for QuantityResponse {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self(record.int("quantity")?))
    }
}
