//! Vendor product management (`products/...`).

use mpsdk_core::{
    normalize, normalize_list, normalize_strings, Division, DomainError, PimProductDeclination,
    Shipping, UpdateShippingCommand,
};
use serde_json::Value;

use crate::error::ClientError;
use crate::http::{HttpClient, RequestOptions};
use crate::services::{segment, to_json, RemapStatus};

pub struct ProductService<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> ProductService<'a, C> {
    #[must_use]
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Stock and pricing of each option combination of a product.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session and
    /// [`ClientError::NotFound`] for an unknown product.
    pub async fn product_declinations(
        &self,
        product_id: i64,
    ) -> Result<Vec<PimProductDeclination>, ClientError> {
        self.client.require_authentication()?;
        let body = self
            .client
            .get(
                &format!("products/{product_id}/declinations"),
                RequestOptions::new(),
            )
            .await
            .or_not_found(|| not_found(product_id))?;
        Ok(normalize_list(&body)?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session and
    /// [`ClientError::NotFound`] for an unknown product.
    pub async fn delete_product(&self, product_id: i64) -> Result<(), ClientError> {
        self.client.require_authentication()?;
        self.client
            .delete(&format!("products/{product_id}"), RequestOptions::new())
            .await
            .or_not_found(|| not_found(product_id))?;
        Ok(())
    }

    /// Country codes for which the product has division settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session,
    /// [`ClientError::NotFound`] for an unknown product, and
    /// [`ClientError::Normalize`] if the body is not a list of strings.
    pub async fn divisions_countries_codes(
        &self,
        product_id: i64,
    ) -> Result<Vec<String>, ClientError> {
        self.client.require_authentication()?;
        let body = self
            .client
            .get(
                &format!("products/{product_id}/divisions"),
                RequestOptions::new(),
            )
            .await
            .or_not_found(|| not_found(product_id))?;
        Ok(normalize_strings(&body)?)
    }

    /// Divisions of `country_code` with their enabled state for the product.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session and
    /// [`ClientError::NotFound`] for an unknown product or country.
    pub async fn divisions(
        &self,
        product_id: i64,
        country_code: &str,
    ) -> Result<Vec<Division>, ClientError> {
        self.client.require_authentication()?;
        let body = self
            .client
            .get(
                &divisions_path(product_id, country_code),
                RequestOptions::new(),
            )
            .await
            .or_not_found(|| not_found(product_id))?;
        Ok(normalize_list(&body)?)
    }

    /// Replaces the set of divisions enabled for the product in
    /// `country_code` and returns the resulting divisions.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session and
    /// [`ClientError::NotFound`] for an unknown product or country.
    pub async fn put_divisions(
        &self,
        product_id: i64,
        country_code: &str,
        codes: &[String],
    ) -> Result<Vec<Division>, ClientError> {
        self.client.require_authentication()?;
        let options = RequestOptions {
            form: codes
                .iter()
                .map(|code| ("code[]".to_owned(), code.clone()))
                .collect(),
            ..RequestOptions::default()
        };
        let body = self
            .client
            .put(&divisions_path(product_id, country_code), options)
            .await
            .or_not_found(|| not_found(product_id))?;
        if body == Value::Null {
            return Ok(Vec::new());
        }
        Ok(normalize_list(&body)?)
    }

    /// Shipping methods available for the product.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session and
    /// [`ClientError::NotFound`] for an unknown product.
    pub async fn shippings(&self, product_id: i64) -> Result<Vec<Shipping>, ClientError> {
        self.client.require_authentication()?;
        let body = self
            .client
            .get(
                &format!("products/{product_id}/shippings"),
                RequestOptions::new(),
            )
            .await
            .or_not_found(|| not_found(product_id))?;
        Ok(normalize_list(&body)?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session and
    /// [`ClientError::NotFound`] for an unknown product or shipping.
    pub async fn shipping(
        &self,
        product_id: i64,
        shipping_id: i64,
    ) -> Result<Shipping, ClientError> {
        self.client.require_authentication()?;
        let body = self
            .client
            .get(
                &shipping_path(product_id, shipping_id),
                RequestOptions::new(),
            )
            .await
            .or_not_found(|| shipping_not_found(product_id, shipping_id))?;
        Ok(normalize(&body)?)
    }

    /// Replaces the status and rates of one shipping method of the product
    /// named by `command`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session,
    /// [`ClientError::Domain`] when `command` is incomplete, and
    /// [`ClientError::NotFound`] for an unknown product or shipping.
    pub async fn put_shipping(
        &self,
        shipping_id: i64,
        command: &UpdateShippingCommand,
    ) -> Result<(), ClientError> {
        self.client.require_authentication()?;
        command.validate()?;
        let product_id = command.product_id().ok_or_else(|| {
            DomainError::SomeParametersAreInvalid("Missing product ID".to_owned())
        })?;
        let options = RequestOptions {
            json: Some(to_json(&command.payload(), "shipping update")?),
            ..RequestOptions::default()
        };
        self.client
            .put(&shipping_path(product_id, shipping_id), options)
            .await
            .or_not_found(|| shipping_not_found(product_id, shipping_id))?;
        Ok(())
    }
}

fn shipping_path(product_id: i64, shipping_id: i64) -> String {
    format!("products/{product_id}/shippings/{shipping_id}")
}

fn shipping_not_found(product_id: i64, shipping_id: i64) -> String {
    format!("product #{product_id} or shipping #{shipping_id} not found")
}

fn divisions_path(product_id: i64, country_code: &str) -> String {
    format!("products/{product_id}/divisions/{}", segment(country_code))
}

fn not_found(product_id: i64) -> String {
    format!("product #{product_id} not found")
}
