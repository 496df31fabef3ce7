//! Orders of the signed-in customer (`user/orders`) and of the signed-in
//! vendor (`orders`).

use mpsdk_core::order::{
    CreateOrderReturn, CustomerOrder, Order, OrderReturn, OrderSummary, ReturnReason,
};
use mpsdk_core::{normalize, normalize_list, FromRecord, NormalizeError, OrderStatus, Record};
use serde_json::json;

use crate::error::ClientError;
use crate::http::{HttpClient, RequestOptions};
use crate::services::RemapStatus;

pub struct OrderService<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> OrderService<'a, C> {
    #[must_use]
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Orders placed by the signed-in customer.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session.
    pub async fn orders(&self) -> Result<Vec<CustomerOrder>, ClientError> {
        self.client.require_authentication()?;
        let body = self.client.get("user/orders", RequestOptions::new()).await?;
        Ok(normalize_list(&body)?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session and
    /// [`ClientError::NotFound`] for an unknown order.
    pub async fn order(&self, order_id: i64) -> Result<CustomerOrder, ClientError> {
        self.client.require_authentication()?;
        let body = self
            .client
            .get(&format!("user/orders/{order_id}"), RequestOptions::new())
            .await
            .or_not_found(|| format!("order #{order_id} not found"))?;
        Ok(normalize(&body)?)
    }

    /// Orders received by the signed-in vendor, optionally filtered by status
    /// (sent as its single-letter code).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session.
    pub async fn vendor_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderSummary>, ClientError> {
        self.client.require_authentication()?;
        let mut options = RequestOptions::new();
        if let Some(status) = status {
            options = options.with_query("status", status.as_code());
        }
        let body = self.client.get("orders", options).await?;
        Ok(normalize_list(&body)?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session and
    /// [`ClientError::NotFound`] for an unknown order.
    pub async fn vendor_order(&self, order_id: i64) -> Result<Order, ClientError> {
        self.client.require_authentication()?;
        let body = self
            .client
            .get(&format!("orders/{order_id}"), RequestOptions::new())
            .await
            .or_not_found(|| format!("order #{order_id} not found"))?;
        Ok(normalize(&body)?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session and
    /// [`ClientError::NotFound`] for an unknown order.
    pub async fn accept_order(&self, order_id: i64) -> Result<(), ClientError> {
        self.client.require_authentication()?;
        self.client
            .put(&format!("orders/{order_id}/accept"), RequestOptions::new())
            .await
            .or_not_found(|| format!("order #{order_id} not found"))?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session and
    /// [`ClientError::NotFound`] for an unknown order.
    pub async fn decline_order(
        &self,
        order_id: i64,
        reason: Option<&str>,
    ) -> Result<(), ClientError> {
        self.client.require_authentication()?;
        let mut options = RequestOptions::new();
        if let Some(reason) = reason {
            options = options.with_json(json!({ "reason": reason }));
        }
        self.client
            .put(&format!("orders/{order_id}/decline"), options)
            .await
            .or_not_found(|| format!("order #{order_id} not found"))?;
        Ok(())
    }

    /// Returns opened by the signed-in customer.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session.
    pub async fn order_returns(&self) -> Result<Vec<OrderReturn>, ClientError> {
        self.client.require_authentication()?;
        let body = self.client.get("user/returns", RequestOptions::new()).await?;
        Ok(normalize_list(&body)?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::AuthenticationRequired`] without a session and
    /// [`ClientError::NotFound`] for an unknown return.
    pub async fn order_return(&self, return_id: i64) -> Result<OrderReturn, ClientError> {
        self.client.require_authentication()?;
        let body = self
            .client
            .get(
                &format!("user/orders/returns/{return_id}"),
                RequestOptions::new(),
            )
            .await
            .or_not_found(|| format!("return #{return_id} not found"))?;
        Ok(normalize(&body)?)
    }

    /// Reasons a customer can give when returning an item.
    ///
    /// # Errors
    ///
    /// Propagates transport and normalization errors.
    pub async fn return_reasons(&self) -> Result<Vec<ReturnReason>, ClientError> {
        let body = self
            .client
            .get("orders/returns/reasons", RequestOptions::new())
            .await?;
        Ok(normalize_list(&body)?)
    }

    /// Opens a return for some or all items of an order and returns its id.
    ///
    /// # Errors
    ///
    /// - [`ClientError::AuthenticationRequired`] without a session.
    /// - [`mpsdk_core::DomainError::SomeParametersAreInvalid`] (as
    ///   [`ClientError::Domain`]) when the request lists no valid item;
    ///   nothing is sent in that case.
    /// - [`ClientError::NotFound`] for an unknown order.
    pub async fn create_order_return(
        &self,
        command: &CreateOrderReturn,
    ) -> Result<i64, ClientError> {
        let user_id = self.client.require_user_id()?;
        command.validate()?;

        let order_id = command.order_id();
        let options = RequestOptions {
            form: command.form_fields(user_id),
            ..RequestOptions::default()
        };
        let body = self
            .client
            .post(&format!("user/orders/{order_id}/returns"), options)
            .await
            .or_not_found(|| format!("order #{order_id} not found"))?;
        let CreatedReturn(return_id) = normalize(&body)?;
        Ok(return_id)
    }
}

/// Response of `POST user/orders/{id}/returns`.
struct CreatedReturn(i64);

impl FromRecord for CreatedReturn {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        Ok(Self(record.int("returnId")?))
    }
}

#[cfg(test)]
mod tests {
    use mpsdk_core::catalog::DeclinationId;
    use serde_json::{json, Value};

    use super::*;
    use crate::http::Method;
    use crate::services::fake::FakeClient;

    fn summary_json(order_id: i64, status: &str) -> Value {
        json!({
            "order_id": order_id,
            "company_id": 3,
            "user_id": 7,
            "total": 67.9,
            "timestamp": 1_551_876_336,
            "status": status,
            "email": "customer-1@world-company.com",
            "customer_firstname": "Paul",
            "customer_lastname": "Martin",
            "last_status_change": "2019-03-06 12:45:36"
        })
    }

    #[tokio::test]
    async fn anonymous_session_is_rejected_before_any_request() {
        let client = FakeClient::anonymous();
        let orders = OrderService::new(&client);

        assert!(matches!(
            orders.orders().await,
            Err(ClientError::AuthenticationRequired)
        ));
        assert!(matches!(
            orders.accept_order(5).await,
            Err(ClientError::AuthenticationRequired)
        ));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn vendor_orders_filter_by_status() {
        let client = FakeClient::authenticated().reply(json!([summary_json(5, "P")]));
        let orders = OrderService::new(&client);

        let listed = orders
            .vendor_orders(Some(OrderStatus::StandbyVendor))
            .await
            .unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].status(), OrderStatus::StandbyVendor);
        let request = client.single_request();
        assert_eq!(request.path, "orders");
        assert_eq!(
            request.options.query,
            [("status".to_owned(), "P".to_owned())]
        );
    }

    #[tokio::test]
    async fn unknown_vendor_order_is_not_found() {
        let client = FakeClient::authenticated().reply_status(404, "");
        let orders = OrderService::new(&client);

        let err = orders.vendor_order(99).await.unwrap_err();

        assert!(matches!(err, ClientError::NotFound(ref m) if m == "order #99 not found"));
    }

    #[tokio::test]
    async fn decline_sends_reason_when_given() {
        let client = FakeClient::authenticated()
            .reply(Value::Null)
            .reply(Value::Null);
        let orders = OrderService::new(&client);

        orders.decline_order(5, Some("Product out of stock")).await.unwrap();
        orders.decline_order(5, None).await.unwrap();

        let requests = client.requests();
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[0].path, "orders/5/decline");
        assert_eq!(
            requests[0].options.json,
            Some(json!({"reason": "Product out of stock"}))
        );
        assert_eq!(requests[1].options.json, None);
    }

    fn return_json(id: i64) -> Value {
        json!({
            "id": id,
            "orderId": 5,
            "userId": 7,
            "createdAt": "2019-03-06T13:45:36+01:00",
            "comments": "Too big",
            "status": "R",
            "items": []
        })
    }

    #[tokio::test]
    async fn order_returns_are_listed_for_the_customer() {
        let client = FakeClient::authenticated().reply(json!([return_json(1), return_json(2)]));
        let orders = OrderService::new(&client);

        let returns = orders.order_returns().await.unwrap();

        let ids: Vec<i64> = returns.iter().map(OrderReturn::id).collect();
        assert_eq!(ids, [1, 2]);
        assert_eq!(client.single_request().path, "user/returns");
    }

    #[tokio::test]
    async fn unknown_return_is_not_found() {
        let client = FakeClient::authenticated().reply_status(404, "");
        let orders = OrderService::new(&client);

        let err = orders.order_return(12).await.unwrap_err();

        assert!(matches!(err, ClientError::NotFound(ref m) if m == "return #12 not found"));
        assert_eq!(client.single_request().path, "user/orders/returns/12");
    }

    #[tokio::test]
    async fn return_reasons_need_no_session() {
        let client = FakeClient::anonymous().reply(json!([
            {"id": 1, "position": 0, "name": "Broken"},
            {"id": 2, "position": 1, "name": "Too big"}
        ]));
        let orders = OrderService::new(&client);

        let reasons = orders.return_reasons().await.unwrap();

        assert_eq!(reasons[1].name(), "Too big");
        assert_eq!(client.single_request().path, "orders/returns/reasons");
    }

    #[tokio::test]
    async fn create_return_posts_form_with_session_user() {
        let client = FakeClient::authenticated().reply(json!({"returnId": 42}));
        let orders = OrderService::new(&client);
        let command = CreateOrderReturn::new(5)
            .with_comments("Too big")
            .with_item(DeclinationId::new("1_0"), 2, 1);

        let return_id = orders.create_order_return(&command).await.unwrap();

        assert_eq!(return_id, 42);
        let request = client.single_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "user/orders/5/returns");
        assert_eq!(request.options.form[0], ("userId".to_owned(), "7".to_owned()));
        assert!(request
            .options
            .form
            .contains(&("items[0][declinationId]".to_owned(), "1_0".to_owned())));
    }

    #[tokio::test]
    async fn create_return_requires_session_and_items() {
        let anonymous = FakeClient::anonymous();
        let command = CreateOrderReturn::new(5).with_item(DeclinationId::new("1_0"), 2, 1);
        let err = OrderService::new(&anonymous)
            .create_order_return(&command)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::AuthenticationRequired));

        let client = FakeClient::authenticated();
        let err = OrderService::new(&client)
            .create_order_return(&CreateOrderReturn::new(5))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Domain(mpsdk_core::DomainError::SomeParametersAreInvalid(_))
        ));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn create_return_without_return_id_is_malformed() {
        let client = FakeClient::authenticated().reply(json!({}));
        let command = CreateOrderReturn::new(5).with_item(DeclinationId::new("1_0"), 2, 1);

        let err = OrderService::new(&client)
            .create_order_return(&command)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::Normalize(NormalizeError::MalformedPayload { ref key, .. }) if key == "returnId"
        ));
    }
}
