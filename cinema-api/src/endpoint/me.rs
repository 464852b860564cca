use cinema_client::HttpTransport;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::MyOrderListResponse;
use crate::models::MyTicketListResponse;
use crate::models::RecommendationEvent;
use crate::models::RecommendationEventRead;
use crate::models::RecommendationFeedback;
use crate::models::RecommendationFeedbackRead;
use crate::models::RecommendationListResponse;
use crate::query::QueryParams;
use crate::request::ApiRequest;

pub const DEFAULT_RECOMMENDATION_LIMIT: u32 = 8;

impl<T: HttpTransport> ApiClient<T> {
    pub async fn my_tickets(&self) -> Result<MyTicketListResponse> {
        self.request_json(ApiRequest::get("/me/tickets")).await
    }

    pub async fn my_orders(&self) -> Result<MyOrderListResponse> {
        self.request_json(ApiRequest::get("/me/orders")).await
    }

    pub async fn my_recommendations(&self, limit: u32) -> Result<RecommendationListResponse> {
        self.request_json(
            ApiRequest::get("/me/recommendations")
                .with_query(QueryParams::new().with("limit", limit)),
        )
        .await
    }

    pub async fn submit_recommendation_feedback(
        &self,
        feedback: &RecommendationFeedback,
    ) -> Result<RecommendationFeedbackRead> {
        self.request_json(ApiRequest::post("/me/recommendations/feedback").with_json(feedback)?)
            .await
    }

    pub async fn record_recommendation_event(
        &self,
        event: &RecommendationEvent,
    ) -> Result<RecommendationEventRead> {
        self.request_json(ApiRequest::post("/me/recommendations/events").with_json(event)?)
            .await
    }
}
