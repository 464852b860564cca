use chrono::NaiveDate;
use cinema_client::HttpTransport;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::MovieDetail;
use crate::models::MovieListResponse;
use crate::models::SeatMap;
use crate::models::ShowtimeListResponse;
use crate::models::TheaterListResponse;
use crate::query::QueryParams;
use crate::request::ApiRequest;

/// Filters for `GET /movies`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuery {
    pub q: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for MovieQuery {
    fn default() -> Self {
        Self {
            q: None,
            limit: 12,
            offset: 0,
        }
    }
}

impl MovieQuery {
    fn params(&self) -> QueryParams {
        QueryParams::new()
            .with("q", self.q.as_deref())
            .with("limit", self.limit)
            .with("offset", self.offset)
    }
}

/// Filters for `GET /theaters`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TheaterQuery {
    pub city: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for TheaterQuery {
    fn default() -> Self {
        Self {
            city: None,
            limit: 20,
            offset: 0,
        }
    }
}

impl TheaterQuery {
    fn params(&self) -> QueryParams {
        QueryParams::new()
            .with("city", self.city.as_deref())
            .with("limit", self.limit)
            .with("offset", self.offset)
    }
}

/// Filters for `GET /showtimes`. `include_past` is only sent when set so the
/// backend default applies otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowtimeQuery {
    pub movie_id: Option<i64>,
    pub theater_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub include_past: Option<bool>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ShowtimeQuery {
    fn default() -> Self {
        Self {
            movie_id: None,
            theater_id: None,
            date: None,
            include_past: None,
            limit: 20,
            offset: 0,
        }
    }
}

impl ShowtimeQuery {
    fn params(&self) -> QueryParams {
        QueryParams::new()
            .with("movie_id", self.movie_id)
            .with("theater_id", self.theater_id)
            .with("date", self.date)
            .with("include_past", self.include_past)
            .with("limit", self.limit)
            .with("offset", self.offset)
    }
}

impl<T: HttpTransport> ApiClient<T> {
    pub async fn list_movies(&self, query: &MovieQuery) -> Result<MovieListResponse> {
        self.request_json(ApiRequest::get("/movies").with_query(query.params()))
            .await
    }

    pub async fn get_movie(&self, movie_id: i64) -> Result<MovieDetail> {
        self.request_json(ApiRequest::get(format!("/movies/{movie_id}")))
            .await
    }

    pub async fn list_theaters(&self, query: &TheaterQuery) -> Result<TheaterListResponse> {
        self.request_json(ApiRequest::get("/theaters").with_query(query.params()))
            .await
    }

    pub async fn list_showtimes(&self, query: &ShowtimeQuery) -> Result<ShowtimeListResponse> {
        self.request_json(ApiRequest::get("/showtimes").with_query(query.params()))
            .await
    }

    pub async fn showtime_seats(&self, showtime_id: i64) -> Result<SeatMap> {
        self.request_json(ApiRequest::get(format!("/showtimes/{showtime_id}/seats")))
            .await
    }
}
