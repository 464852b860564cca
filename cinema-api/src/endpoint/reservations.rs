use cinema_client::HttpTransport;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::Reservation;
use crate::models::ReservationCreate;
use crate::query::QueryParams;
use crate::request::ApiRequest;

impl<T: HttpTransport> ApiClient<T> {
    /// Places a timed hold on `seat_ids`. The backend answers 409 when any
    /// seat is already held or sold.
    pub async fn create_reservation(&self, hold: &ReservationCreate) -> Result<Reservation> {
        self.request_json(ApiRequest::post("/reservations").with_json(hold)?)
            .await
    }

    pub async fn get_reservation(&self, reservation_id: i64) -> Result<Reservation> {
        self.request_json(ApiRequest::get(format!("/reservations/{reservation_id}")))
            .await
    }

    /// The caller's live hold for `showtime_id`, if any.
    pub async fn active_reservation(&self, showtime_id: i64) -> Result<Option<Reservation>> {
        self.request_json(
            ApiRequest::get("/reservations/active")
                .with_query(QueryParams::new().with("showtime_id", showtime_id)),
        )
        .await
    }

    pub async fn cancel_reservation(&self, reservation_id: i64) -> Result<()> {
        self.request_empty(ApiRequest::delete(format!("/reservations/{reservation_id}")))
            .await
    }
}
