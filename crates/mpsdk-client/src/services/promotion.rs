//! Vendor catalog promotions (`promotions/catalog`).

use mpsdk_core::{normalize, CatalogPromotion};

use crate::error::ClientError;
use crate::http::{HttpClient, RequestOptions};
use crate::services::{segment, to_json, RemapStatus};

pub struct PromotionService<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> PromotionService<'a, C> {
    #[must_use]
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Creates the promotion, or updates it when it already carries an id,
    /// and returns the stored version.
    ///
    /// # Errors
    ///
    /// - [`ClientError::AuthenticationRequired`] without a session.
    /// - [`mpsdk_core::DomainError::SomeParametersAreInvalid`] or
    ///   [`mpsdk_core::DomainError::InvalidPromotionRule`] (as
    ///   [`ClientError::Domain`]) when local validation fails, when the server
    ///   answers 400, or when it reports an invalid rule.
    pub async fn save_catalog_promotion(
        &self,
        promotion: &CatalogPromotion,
    ) -> Result<CatalogPromotion, ClientError> {
        self.client.require_authentication()?;
        promotion.validate()?;

        let options = RequestOptions::new().with_json(to_json(promotion, "catalog promotion")?);
        let response = match promotion.id() {
            Some(id) => {
                self.client
                    .put(&format!("promotions/catalog/{id}"), options)
                    .await
            }
            None => self.client.post("promotions/catalog", options).await,
        };
        let body = response.or_invalid_parameters()?;
        Ok(normalize(&body)?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session and
    /// [`ClientError::NotFound`] for an unknown promotion.
    pub async fn catalog_promotion(&self, id: &str) -> Result<CatalogPromotion, ClientError> {
        self.client.require_authentication()?;
        let body = self
            .client
            .get(
                &format!("promotions/catalog/{}", segment(id)),
                RequestOptions::new(),
            )
            .await
            .or_not_found(|| format!("promotion {id} not found"))?;
        Ok(normalize(&body)?)
    }
}
