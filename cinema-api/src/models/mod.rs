//! JSON shapes exchanged with the backend.
//!
//! Field names follow the backend's snake_case wire format. Write models
//! (`*Create`, `*Update`) skip unset optional fields so PATCH bodies only
//! carry what changed.

mod auth;
mod catalog;
mod checkout;
mod portal;
mod reservation;

pub use auth::AuthTokens;
pub use auth::AuthUser;
pub use auth::Credentials;
pub use auth::RefreshRequest;
pub use catalog::Auditorium;
pub use catalog::AuditoriumCreate;
pub use catalog::AuditoriumListResponse;
pub use catalog::MovieCreate;
pub use catalog::MovieDetail;
pub use catalog::MovieListItem;
pub use catalog::MovieListResponse;
pub use catalog::MovieUpdate;
pub use catalog::SeatMap;
pub use catalog::SeatStatus;
pub use catalog::Showtime;
pub use catalog::ShowtimeCreate;
pub use catalog::ShowtimeListResponse;
pub use catalog::ShowtimeUpdate;
pub use catalog::Theater;
pub use catalog::TheaterCreate;
pub use catalog::TheaterListResponse;
pub use catalog::TheaterUpdate;
pub use checkout::CheckoutFinalize;
pub use checkout::CheckoutSession;
pub use checkout::CheckoutSessionCreate;
pub use checkout::DEFAULT_CHECKOUT_PROVIDER;
pub use checkout::DemoConfirmRequest;
pub use checkout::IssuedTicket;
pub use checkout::Order;
pub use portal::MyOrder;
pub use portal::MyOrderListResponse;
pub use portal::MyTicket;
pub use portal::MyTicketListResponse;
pub use portal::Recommendation;
pub use portal::RecommendationEvent;
pub use portal::RecommendationEventKind;
pub use portal::RecommendationEventRead;
pub use portal::RecommendationFeedback;
pub use portal::RecommendationFeedbackKind;
pub use portal::RecommendationFeedbackRead;
pub use portal::RecommendationListResponse;
pub use portal::SalesReport;
pub use portal::ShowtimeSales;
pub use portal::TicketScanRequest;
pub use portal::TicketScanResponse;
pub use reservation::Reservation;
pub use reservation::ReservationCreate;
