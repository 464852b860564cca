use cinema_client::HttpTransport;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::CheckoutFinalize;
use crate::models::CheckoutSession;
use crate::models::CheckoutSessionCreate;
use crate::models::DemoConfirmRequest;
use crate::models::Order;
use crate::request::ApiRequest;

impl<T: HttpTransport> ApiClient<T> {
    pub async fn create_checkout_session(
        &self,
        checkout: &CheckoutSessionCreate,
    ) -> Result<CheckoutSession> {
        self.request_json(ApiRequest::post("/checkout/session").with_json(checkout)?)
            .await
    }

    /// Marks the order paid through the demo provider and issues tickets.
    pub async fn confirm_demo_checkout(&self, order_id: i64) -> Result<CheckoutFinalize> {
        let body = DemoConfirmRequest { order_id };
        self.request_json(ApiRequest::post("/checkout/demo/confirm").with_json(&body)?)
            .await
    }

    pub async fn get_order(&self, order_id: i64) -> Result<Order> {
        self.request_json(ApiRequest::get(format!("/checkout/orders/{order_id}")))
            .await
    }
}
