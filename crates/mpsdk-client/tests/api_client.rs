//! Integration tests for `ApiClient` and the façades using wiremock HTTP mocks.

use futures::TryStreamExt;
use mpsdk_client::{
    ApiClient, CatalogService, ClientError, HttpClient, OrderService, PromotionService,
    RequestOptions,
};
use mpsdk_core::catalog::{Product, ProductReport};
use mpsdk_core::{ApiCredentials, CatalogPromotion, CatalogRule, DomainError};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{basic_auth, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> ApiClient {
    ApiClient::with_base_url(&format!("{}/api/v1", server.uri()), 30)
        .expect("client construction should not fail")
}

fn credentials() -> ApiCredentials {
    ApiCredentials {
        user_id: 7,
        api_key: "test-key".to_owned(),
    }
}

fn product(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "code": format!("CODE-{id}"),
        "supplierReference": format!("REF-{id}"),
        "name": format!("Product {id}"),
        "minPrice": "9.90"
    })
}

#[tokio::test]
async fn export_pages_are_fetched_until_last_page() {
    let server = MockServer::start().await;

    for (page, ids) in [(1, vec![1, 2]), (2, vec![3])] {
        let products: Vec<_> = ids.into_iter().map(product).collect();
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/catalog/export/{page}")))
            .and(header("Accept-Language", "de"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": products,
                "pagination": {"page": page, "nbPages": 2}
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = test_client(&server).with_language("fr");
    let catalog = CatalogService::new(&client);
    let products: Vec<Product> = catalog
        .all_products(Some("de"))
        .try_collect()
        .await
        .expect("export should succeed");

    let ids: Vec<i64> = products.iter().map(Product::id).collect();
    assert_eq!(ids, [1, 2, 3]);
}

#[tokio::test]
async fn credentials_are_sent_as_token_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/orders"))
        .and(query_param("status", "P"))
        .and(header("Authorization", "token test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "order_id": 5,
            "company_id": 3,
            "user_id": 7,
            "email": "customer-1@world-company.com",
            "customer_firstname": "Paul",
            "customer_lastname": "Martin",
            "status": "P",
            "timestamp": 1_551_876_336,
            "total": 67.9,
            "last_status_change": "0000-00-00 00:00:00"
        }])))
        .mount(&server)
        .await;

    let client = test_client(&server).with_credentials(credentials());
    let orders = OrderService::new(&client)
        .vendor_orders(Some(mpsdk_core::OrderStatus::StandbyVendor))
        .await
        .expect("listing should succeed");

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_id(), 5);
    assert!(orders[0].last_status_change().is_none());
}

#[tokio::test]
async fn authenticate_stores_issued_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/authenticate"))
        .and(basic_auth("paul@example.com", "password"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 7, "apiKey": "issued-key"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/orders/5/accept"))
        .and(header("Authorization", "token issued-key"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = test_client(&server);
    assert!(!client.is_authenticated());

    let issued = client
        .authenticate("paul@example.com", "password")
        .await
        .expect("authentication should succeed");
    assert_eq!(issued.user_id, 7);
    assert!(client.is_authenticated());

    OrderService::new(&client)
        .accept_order(5)
        .await
        .expect("empty 204 body should be accepted");
}

#[tokio::test]
async fn empty_body_decodes_to_null() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/products/1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let body = client
        .delete("products/1", RequestOptions::new())
        .await
        .expect("request should succeed");

    assert!(body.is_null());
}

#[tokio::test]
async fn company_404_becomes_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/catalog/companies/42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = CatalogService::new(&client)
        .company_by_id(42)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn server_error_propagates_as_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/catalog/attributes"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = CatalogService::new(&client).attributes().await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(matches!(err, ClientError::Status { ref body, .. } if body == "maintenance"));
}

#[tokio::test]
async fn report_400_becomes_invalid_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/catalog/products/12/report"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid email"))
        .mount(&server)
        .await;

    let report = ProductReport::new()
        .with_product_id("12")
        .with_reporter_name("Jane")
        .with_reporter_email("jane@example.com")
        .with_message("fake");
    let client = test_client(&server);
    let err = CatalogService::new(&client)
        .report_product(&report)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Domain(DomainError::SomeParametersAreInvalid(ref body)) if body == "invalid email"
    ));
}

#[tokio::test]
async fn error_envelope_becomes_invalid_promotion_rule() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/promotions/catalog"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 11,
                "message": "Invalid promotion rule",
                "context": {"rule": "product_in_list", "reason": "unknown product 99"}
            }
        })))
        .mount(&server)
        .await;

    let promotion = CatalogPromotion::new("Summer", Decimal::new(10, 0))
        .with_rule(CatalogRule::ProductInList { products_ids: vec![99] });
    let client = test_client(&server).with_credentials(credentials());
    let err = PromotionService::new(&client)
        .save_catalog_promotion(&promotion)
        .await
        .unwrap_err();

    let ClientError::Domain(domain) = err else {
        panic!("expected a domain error");
    };
    assert!(matches!(domain, DomainError::InvalidPromotionRule { .. }));
    assert_eq!(
        domain.context().and_then(|c| c.get("reason")),
        Some(&json!("unknown product 99"))
    );
}

#[tokio::test]
async fn non_json_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/catalog/attributes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = CatalogService::new(&client).attributes().await.unwrap_err();

    assert!(matches!(err, ClientError::Deserialize { .. }));
}
