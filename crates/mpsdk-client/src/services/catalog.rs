//! Public catalog: products, declinations, companies, attributes and search.

use futures::stream::{self, Stream, TryStreamExt};
use mpsdk_core::catalog::{
    Attribute, AttributeVariant, BrandSource, CompanyDetail, CompanyListItem, Declination, Pagination, Product,
    ProductAttributeValue, ProductReport, SearchQuery, SearchResult,
};
use mpsdk_core::{normalize, normalize_list, FromRecord, NormalizeError, Record};
use serde_json::json;

use crate::error::ClientError;
use crate::http::{HttpClient, RequestOptions};
use crate::services::{segment, RemapStatus};

pub struct CatalogService<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> CatalogService<'a, C> {
    #[must_use]
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Every product of the catalog, fetched one export page at a time.
    ///
    /// Pages are requested lazily and strictly in sequence, starting at page 1
    /// and stopping once the server reports the last page. Each call starts a
    /// fresh iteration.
    pub fn all_products(
        &self,
        language: Option<&str>,
    ) -> impl Stream<Item = Result<Product, ClientError>> + 'a {
        let client = self.client;
        let language = language.map(str::to_owned);

        stream::try_unfold(Some(1_u32), move |next| {
            let language = language.clone();
            async move {
                let Some(page) = next else {
                    return Ok(None);
                };
                let export = fetch_export_page(client, page, language.as_deref()).await?;
                let next = if export.pagination.is_last() {
                    None
                } else {
                    Some(page + 1)
                };
                let products = export.products.into_iter().map(Ok::<_, ClientError>);
                Ok::<_, ClientError>(Some((stream::iter(products), next)))
            }
        })
        .try_flatten()
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the product does not exist.
    pub async fn product_by_id(&self, id: &str) -> Result<Product, ClientError> {
        let body = self
            .client
            .get(&format!("catalog/products/{}", segment(id)), RequestOptions::new())
            .await
            .or_not_found(|| format!("product #{id} not found"))?;
        Ok(normalize(&body)?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the declination does not exist.
    pub async fn declination_by_id(&self, id: &str) -> Result<Declination, ClientError> {
        let body = self
            .client
            .get(
                &format!("catalog/declinations/{}", segment(id)),
                RequestOptions::new(),
            )
            .await
            .or_not_found(|| format!("declination #{id} not found"))?;
        Ok(normalize(&body)?)
    }

    /// # Errors
    ///
    /// Propagates transport and normalization errors.
    pub async fn products_by_code(&self, code: &str) -> Result<Vec<Product>, ClientError> {
        self.products_where("code", code).await
    }

    /// # Errors
    ///
    /// Propagates transport and normalization errors.
    pub async fn products_by_supplier_reference(
        &self,
        supplier_reference: &str,
    ) -> Result<Vec<Product>, ClientError> {
        self.products_where("supplierRef", supplier_reference).await
    }

    async fn products_where(&self, key: &str, value: &str) -> Result<Vec<Product>, ClientError> {
        let options = RequestOptions::new().with_query(key, value);
        let body = self.client.get("catalog/products", options).await?;
        Ok(normalize_list(&body)?)
    }

    /// # Errors
    ///
    /// Propagates transport and normalization errors.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult, ClientError> {
        let options = RequestOptions {
            query: query.to_query_pairs(),
            ..RequestOptions::default()
        };
        let body = self.client.get("catalog/search/products", options).await?;
        Ok(normalize(&body)?)
    }

    /// Every vendor of the marketplace, in server order.
    ///
    /// # Errors
    ///
    /// Propagates transport and normalization errors.
    pub async fn companies(&self) -> Result<Vec<CompanyListItem>, ClientError> {
        let body = self
            .client
            .get("catalog/companies", RequestOptions::new())
            .await?;
        Ok(normalize_list(&body)?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the company does not exist.
    pub async fn company_by_id(&self, id: i64) -> Result<CompanyDetail, ClientError> {
        let body = self
            .client
            .get(&format!("catalog/companies/{id}"), RequestOptions::new())
            .await
            .or_not_found(|| format!("company #{id} not found"))?;
        Ok(normalize(&body)?)
    }

    /// # Errors
    ///
    /// Propagates transport and normalization errors.
    pub async fn attributes(&self) -> Result<Vec<Attribute>, ClientError> {
        let body = self
            .client
            .get("catalog/attributes", RequestOptions::new())
            .await?;
        Ok(normalize_list(&body)?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the attribute does not exist.
    pub async fn attribute(&self, id: i64) -> Result<Attribute, ClientError> {
        let body = self
            .client
            .get(&format!("catalog/attributes/{id}"), RequestOptions::new())
            .await
            .or_not_found(|| format!("attribute #{id} not found"))?;
        Ok(normalize(&body)?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the variant does not exist.
    pub async fn attribute_variant(&self, id: i64) -> Result<AttributeVariant, ClientError> {
        let body = self
            .client
            .get(
                &format!("catalog/attributes/variants/{id}"),
                RequestOptions::new(),
            )
            .await
            .or_not_found(|| format!("attribute variant #{id} not found"))?;
        Ok(normalize(&body)?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the attribute does not exist.
    pub async fn attribute_variants(
        &self,
        attribute_id: i64,
    ) -> Result<Vec<AttributeVariant>, ClientError> {
        let body = self
            .client
            .get(
                &format!("catalog/attributes/{attribute_id}/variants"),
                RequestOptions::new(),
            )
            .await
            .or_not_found(|| format!("attribute #{attribute_id} not found"))?;
        Ok(normalize_list(&body)?)
    }

    /// Reports a suspicious product to the marketplace administrator.
    ///
    /// The report is validated before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns [`mpsdk_core::DomainError::SomeParametersAreInvalid`] (wrapped
    /// in [`ClientError::Domain`]) when validation fails or the server
    /// answers 400.
    pub async fn report_product(&self, report: &ProductReport) -> Result<(), ClientError> {
        report.validate()?;

        let body = json!({
            "productId": report.product_id(),
            "name": report.reporter_name(),
            "email": report.reporter_email(),
            "message": report.message(),
        });
        self.client
            .post(
                &format!("catalog/products/{}/report", segment(report.product_id())),
                RequestOptions::new().with_json(body),
            )
            .await
            .or_invalid_parameters()?;
        Ok(())
    }

    /// The brand of a product: the first value of its first brand-list
    /// attribute.
    ///
    /// Summaries embed the value, so no request is made. Full products only
    /// carry a value id, which costs one attribute-variant lookup.
    ///
    /// # Errors
    ///
    /// Propagates errors of the variant lookup.
    pub async fn brand(
        &self,
        source: BrandSource<'_>,
    ) -> Result<Option<ProductAttributeValue>, ClientError> {
        match source {
            BrandSource::Summary(summary) => Ok(summary.brand().cloned()),
            BrandSource::Full(product) => self.brand_from_product(product).await,
        }
    }

    /// # Errors
    ///
    /// Propagates errors of the variant lookup.
    pub async fn brand_from_product(
        &self,
        product: &Product,
    ) -> Result<Option<ProductAttributeValue>, ClientError> {
        let Some(&variant_id) = product
            .brand_attribute()
            .and_then(|attribute| attribute.value_ids().first())
        else {
            return Ok(None);
        };
        let variant = self.attribute_variant(variant_id).await?;
        Ok(Some(variant.into()))
    }
}

/// One `catalog/export/{page}` response.
struct ExportPage {
    products: Vec<Product>,
    pagination: Pagination,
}

impl FromRecord for ExportPage {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            products: record.list("result")?,
            pagination: record.nested("pagination")?,
        })
    }
}

async fn fetch_export_page<C: HttpClient>(
    client: &C,
    page: u32,
    language: Option<&str>,
) -> Result<ExportPage, ClientError> {
    let mut options = RequestOptions::new();
    if let Some(language) = language {
        options = options.with_header("Accept-Language", language);
    }

    let body = client
        .get(&format!("catalog/export/{page}"), options)
        .await?;
    let export: ExportPage = normalize(&body)?;

    tracing::debug!(
        page,
        nb_pages = export.pagination.nb_pages(),
        products = export.products.len(),
        "fetched catalog export page"
    );
    Ok(export)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
