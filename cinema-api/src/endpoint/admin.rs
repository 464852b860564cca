use cinema_client::HttpTransport;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::Auditorium;
use crate::models::AuditoriumCreate;
use crate::models::AuditoriumListResponse;
use crate::models::MovieCreate;
use crate::models::MovieDetail;
use crate::models::MovieUpdate;
use crate::models::SalesReport;
use crate::models::Showtime;
use crate::models::ShowtimeCreate;
use crate::models::ShowtimeUpdate;
use crate::models::Theater;
use crate::models::TheaterCreate;
use crate::models::TheaterUpdate;
use crate::query::QueryParams;
use crate::request::ApiRequest;

pub const DEFAULT_SALES_LIMIT: u32 = 10;

/// Filters for `GET /admin/auditoriums`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditoriumQuery {
    pub theater_id: Option<i64>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for AuditoriumQuery {
    fn default() -> Self {
        Self {
            theater_id: None,
            limit: 100,
            offset: 0,
        }
    }
}

impl<T: HttpTransport> ApiClient<T> {
    pub async fn sales_report(&self, limit: u32) -> Result<SalesReport> {
        self.request_json(
            ApiRequest::get("/admin/reports/sales")
                .with_query(QueryParams::new().with("limit", limit)),
        )
        .await
    }

    pub async fn create_movie(&self, movie: &MovieCreate) -> Result<MovieDetail> {
        self.request_json(ApiRequest::post("/admin/movies").with_json(movie)?)
            .await
    }

    pub async fn update_movie(&self, movie_id: i64, changes: &MovieUpdate) -> Result<MovieDetail> {
        self.request_json(
            ApiRequest::patch(format!("/admin/movies/{movie_id}")).with_json(changes)?,
        )
        .await
    }

    pub async fn delete_movie(&self, movie_id: i64) -> Result<()> {
        self.request_empty(ApiRequest::delete(format!("/admin/movies/{movie_id}")))
            .await
    }

    pub async fn create_theater(&self, theater: &TheaterCreate) -> Result<Theater> {
        self.request_json(ApiRequest::post("/admin/theaters").with_json(theater)?)
            .await
    }

    pub async fn update_theater(
        &self,
        theater_id: i64,
        changes: &TheaterUpdate,
    ) -> Result<Theater> {
        self.request_json(
            ApiRequest::patch(format!("/admin/theaters/{theater_id}")).with_json(changes)?,
        )
        .await
    }

    pub async fn delete_theater(&self, theater_id: i64) -> Result<()> {
        self.request_empty(ApiRequest::delete(format!("/admin/theaters/{theater_id}")))
            .await
    }

    pub async fn list_auditoriums(
        &self,
        query: &AuditoriumQuery,
    ) -> Result<AuditoriumListResponse> {
        let params = QueryParams::new()
            .with("theater_id", query.theater_id)
            .with("limit", query.limit)
            .with("offset", query.offset);
        self.request_json(ApiRequest::get("/admin/auditoriums").with_query(params))
            .await
    }

    pub async fn create_auditorium(&self, auditorium: &AuditoriumCreate) -> Result<Auditorium> {
        self.request_json(ApiRequest::post("/admin/auditoriums").with_json(auditorium)?)
            .await
    }

    pub async fn create_showtime(&self, showtime: &ShowtimeCreate) -> Result<Showtime> {
        self.request_json(ApiRequest::post("/admin/showtimes").with_json(showtime)?)
            .await
    }

    pub async fn update_showtime(
        &self,
        showtime_id: i64,
        changes: &ShowtimeUpdate,
    ) -> Result<Showtime> {
        self.request_json(
            ApiRequest::patch(format!("/admin/showtimes/{showtime_id}")).with_json(changes)?,
        )
        .await
    }

    pub async fn delete_showtime(&self, showtime_id: i64) -> Result<()> {
        self.request_empty(ApiRequest::delete(format!("/admin/showtimes/{showtime_id}")))
            .await
    }
}
