#![allow(clippy::expect_used)]

mod common;

use assert_matches::assert_matches;
use cinema_api::ApiError;
use cinema_api::endpoint::MovieQuery;
use cinema_api::endpoint::STAFF_TOKEN_HEADER;
use cinema_api::models::CheckoutSessionCreate;
use cinema_api::models::ReservationCreate;
use cinema_client::Response;
use common::MockTransport;
use common::bearer;
use common::client_with;
use common::json_response;
use http::Method;
use http::StatusCode;
use http::header::CONTENT_TYPE;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn movie_search_sends_all_filters() {
    let transport = MockTransport::scripted(vec![json_response(
        StatusCode::OK,
        json!({"items": [], "total": 0, "limit": 10, "offset": 20}),
    )]);
    let client = client_with(transport.clone());

    let page = client
        .list_movies(&MovieQuery {
            q: Some("sky".to_string()),
            limit: 10,
            offset: 20,
        })
        .await
        .expect("movie list");

    assert_eq!(page.total, 0);
    let seen = transport.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, Method::GET);
    assert_eq!(
        seen[0].url,
        "http://backend.test/api/movies?q=sky&limit=10&offset=20"
    );
    assert_eq!(seen[0].body, None);
}

#[tokio::test]
async fn movie_page_is_passed_through_unchanged() {
    let body = json!({"items": [], "total": 0});
    let transport = MockTransport::scripted(vec![json_response(StatusCode::OK, body.clone())]);
    let client = client_with(transport.clone());

    let page = client
        .list_movies(&MovieQuery {
            q: Some("sky".to_string()),
            limit: 10,
            offset: 20,
        })
        .await
        .expect("movie list");

    assert_eq!(serde_json::to_value(&page).expect("serializable"), body);
}

#[tokio::test]
async fn empty_search_term_is_not_sent() {
    let transport = MockTransport::scripted(vec![json_response(
        StatusCode::OK,
        json!({"items": [], "total": 0, "limit": 12, "offset": 0}),
    )]);
    let client = client_with(transport.clone());

    client
        .list_movies(&MovieQuery {
            q: Some(String::new()),
            ..MovieQuery::default()
        })
        .await
        .expect("movie list");

    assert_eq!(
        transport.seen()[0].url,
        "http://backend.test/api/movies?limit=12&offset=0"
    );
}

#[tokio::test]
async fn deleting_a_movie_accepts_no_content() {
    let transport = MockTransport::scripted(vec![Response::new(StatusCode::NO_CONTENT, "")]);
    let client = client_with(transport.clone());
    client.session().set_access_token(Some("admin-token"));

    client.delete_movie(42).await.expect("delete succeeds");

    let seen = transport.seen();
    assert_eq!(seen[0].method, Method::DELETE);
    assert_eq!(seen[0].url, "http://backend.test/api/admin/movies/42");
    assert_eq!(bearer(&seen[0]).as_deref(), Some("Bearer admin-token"));
    assert_eq!(seen[0].headers.get(CONTENT_TYPE), None);
}

#[tokio::test]
async fn staff_scan_uses_staff_token_without_session() {
    let transport = MockTransport::scripted(vec![json_response(
        StatusCode::OK,
        json!({
            "result": "VALID",
            "ticket_id": 91,
            "order_id": 40,
            "showtime_id": 8,
            "seat_code": "C4",
            "used_at": "2026-10-18T20:05:00Z",
            "message": "Ticket accepted"
        }),
    )]);
    let client = client_with(transport.clone());

    let outcome = client
        .scan_ticket("qr-abc", "door-secret")
        .await
        .expect("scan succeeds");

    assert!(outcome.is_valid());
    assert_eq!(outcome.seat_code.as_deref(), Some("C4"));
    let seen = transport.seen();
    assert_eq!(seen[0].method, Method::POST);
    assert_eq!(seen[0].url, "http://backend.test/api/tickets/scan");
    assert_eq!(
        seen[0]
            .headers
            .get(STAFF_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some("door-secret")
    );
    assert_eq!(bearer(&seen[0]), None);
    assert_eq!(seen[0].body, Some(json!({"qr_token": "qr-abc"})));
}

#[tokio::test]
async fn bad_request_surfaces_backend_detail() {
    let transport = MockTransport::scripted(vec![json_response(
        StatusCode::BAD_REQUEST,
        json!({"detail": "Invalid payload"}),
    )]);
    let client = client_with(transport);

    let err = client
        .create_reservation(&ReservationCreate {
            showtime_id: 8,
            seat_ids: vec![],
        })
        .await
        .expect_err("rejected hold");

    assert_eq!(err.to_string(), "Request failed with status 400: Invalid payload");
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn missing_active_hold_is_none() {
    let transport = MockTransport::scripted(vec![Response::new(StatusCode::OK, "null")]);
    let client = client_with(transport.clone());

    let hold = client.active_reservation(8).await.expect("lookup succeeds");

    assert_eq!(hold, None);
    assert_eq!(
        transport.seen()[0].url,
        "http://backend.test/api/reservations/active?showtime_id=8"
    );
}

#[tokio::test]
async fn checkout_session_posts_default_provider() {
    let transport = MockTransport::scripted(vec![json_response(
        StatusCode::OK,
        json!({
            "order_id": 40,
            "reservation_id": 22,
            "provider": "MOCK_STRIPE",
            "provider_session_id": "cs_demo_1",
            "status": "PENDING",
            "total_cents": 3200,
            "currency": "USD",
            "checkout_url": "https://pay.test/cs_demo_1",
            "created_at": "2026-10-18T19:58:00Z"
        }),
    )]);
    let client = client_with(transport.clone());

    let session = client
        .create_checkout_session(&CheckoutSessionCreate::new(22))
        .await
        .expect("checkout session");

    assert_eq!(session.order_id, 40);
    assert_eq!(
        transport.seen()[0].body,
        Some(json!({"reservation_id": 22, "provider": "MOCK_STRIPE"}))
    );
}

#[tokio::test]
async fn structurally_wrong_body_is_a_decode_error() {
    let transport = MockTransport::scripted(vec![json_response(
        StatusCode::OK,
        json!({"unexpected": true}),
    )]);
    let client = client_with(transport);

    let err = client.get_movie(5).await.expect_err("shape mismatch");

    assert_matches!(err, ApiError::Decode(_));
}

#[tokio::test]
async fn refresh_and_logout_never_trigger_the_retry_path() {
    let transport = MockTransport::scripted(vec![
        json_response(StatusCode::UNAUTHORIZED, json!({"detail": "Invalid refresh token"})),
        json_response(StatusCode::UNAUTHORIZED, json!({"detail": "Invalid refresh token"})),
    ]);
    let client = client_with(transport.clone());
    let refresher = std::sync::Arc::new(common::StubRefresher::new(
        client.session().clone(),
        Ok(true),
    ));
    client.session().set_refresh_handler(refresher.clone());

    let refresh_err = client
        .refresh("refresh-token-value-0001")
        .await
        .expect_err("refresh rejected");
    let logout_err = client
        .logout("refresh-token-value-0001")
        .await
        .expect_err("logout rejected");

    assert_eq!(refresh_err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(logout_err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(refresher.calls(), 0);
    assert_eq!(transport.calls(), 2);
}
