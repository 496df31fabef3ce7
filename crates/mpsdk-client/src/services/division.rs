//! Geographic divisions of the marketplace and of each company.

use mpsdk_core::{build_division_tree, normalize_list, Division, DivisionCompany};

use crate::error::ClientError;
use crate::http::{HttpClient, RequestOptions};
use crate::services::{segment, RemapStatus};

pub struct DivisionService<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> DivisionService<'a, C> {
    #[must_use]
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Flat list of the divisions of a country.
    ///
    /// # Errors
    ///
    /// Propagates transport and normalization errors.
    pub async fn divisions(&self, country_code: &str) -> Result<Vec<Division>, ClientError> {
        let body = self
            .client
            .get(
                &format!("divisions/{}", segment(country_code)),
                RequestOptions::new(),
            )
            .await?;
        Ok(normalize_list(&body)?)
    }

    /// Divisions of a country assembled into a forest by parent code.
    ///
    /// # Errors
    ///
    /// Propagates transport and normalization errors.
    pub async fn division_tree(&self, country_code: &str) -> Result<Vec<Division>, ClientError> {
        let divisions = self.divisions(country_code).await?;
        Ok(build_division_tree(divisions))
    }

    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session and
    /// [`ClientError::NotFound`] for an unknown company.
    pub async fn company_divisions(
        &self,
        company_id: i64,
        country_code: &str,
    ) -> Result<Vec<Division>, ClientError> {
        self.client.require_authentication()?;
        let body = self
            .client
            .get(
                &company_divisions_path(company_id, country_code),
                RequestOptions::new(),
            )
            .await
            .or_not_found(|| not_found(company_id))?;
        Ok(normalize_list(&body)?)
    }

    /// Enables exactly `codes` for the company in `country_code` and returns
    /// the resulting activation state of each division.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session and
    /// [`ClientError::NotFound`] for an unknown company.
    pub async fn put_company_divisions(
        &self,
        company_id: i64,
        country_code: &str,
        codes: &[String],
    ) -> Result<Vec<DivisionCompany>, ClientError> {
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
            .put(&company_divisions_path(company_id, country_code), options)
            .await
            .or_not_found(|| not_found(company_id))?;
        Ok(normalize_list(&body)?)
    }
}

fn company_divisions_path(company_id: i64, country_code: &str) -> String {
    format!("companies/{company_id}/divisions/{}", segment(country_code))
}

fn not_found(company_id: i64) -> String {
    format!("company #{company_id} not found")
}
