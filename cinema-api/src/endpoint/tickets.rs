use cinema_client::HttpTransport;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::TicketScanRequest;
use crate::models::TicketScanResponse;
use crate::request::ApiRequest;

pub const STAFF_TOKEN_HEADER: &str = "x-staff-token";

impl<T: HttpTransport> ApiClient<T> {
    /// Validates and consumes a ticket at the door. Authenticated by the
    /// shared staff token rather than a user session.
    pub async fn scan_ticket(
        &self,
        qr_token: &str,
        staff_token: &str,
    ) -> Result<TicketScanResponse> {
        let body = TicketScanRequest {
            qr_token: qr_token.to_string(),
        };
        let request = ApiRequest::post("/tickets/scan")
            .with_json(&body)?
            .with_header(STAFF_TOKEN_HEADER, staff_token)?;
        self.request_json(request).await
    }
}
