use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::presentation::auth::TokenService;
use crate::presentation::router::build_router;
use crate::presentation::state::AppState;
use crate::test_support::InMemoryStreakRepository;
use dailydev_domain::shared::{FixedClock, UserId};
use dailydev_domain::streak::StreakRecord;
use dailydev_infrastructure::config::TimeoutConfig;

const SECRET: &str = "router-tests-secret-0123456789abcdef";

struct TestApp {
    router: Router,
    repo: Arc<InMemoryStreakRepository>,
    clock: Arc<FixedClock>,
    tokens: TokenService,
}

impl TestApp {
    fn new(records: Vec<StreakRecord>, now: DateTime<Utc>) -> Self {
        let repo = Arc::new(InMemoryStreakRepository::with_records(records));
        let clock = Arc::new(FixedClock::new(now));
        let state = AppState::new(
            repo.clone(),
            clock.clone(),
            TokenService::new(SECRET).unwrap(),
        );

        Self {
            router: build_router(state.shared(), &TimeoutConfig::default()),
            repo,
            clock,
            tokens: TokenService::new(SECRET).unwrap(),
        }
    }

    fn token(&self, user: &str) -> String {
        self.tokens
            .issue(
                &UserId::from_string(user),
                Utc::now(),
                Duration::from_secs(300),
            )
            .unwrap()
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Option<serde_json::Value>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = (!bytes.is_empty()).then(|| serde_json::from_slice(&bytes).unwrap());
        (status, body)
    }

    async fn update_streak(&self, user: &str) -> (StatusCode, Option<serde_json::Value>) {
        let request = Request::builder()
            .method("PUT")
            .uri("/profile/update-streak")
            .header(AUTHORIZATION, format!("Bearer {}", self.token(user)))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }
}

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
}

fn record(user: &str, length: u32, longest: u32, last: DateTime<Utc>) -> StreakRecord {
    StreakRecord::restore(
        UserId::from_string(user),
        length,
        longest,
        Some(last),
        Some(last),
        last,
    )
    .unwrap()
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new(vec![], at(1, 0));
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["status"], "ok");
}

#[tokio::test]
async fn test_update_streak_created_then_no_content() {
    let app = TestApp::new(vec![record("reader", 5, 10, at(3, 21))], at(4, 7));

    let (status, body) = app.update_streak("reader").await;
    assert_eq!(status, StatusCode::CREATED);
    let body = body.unwrap();
    assert_eq!(body["message"], "Streak updated");
    assert_eq!(body["transition"], "extended");
    assert_eq!(body["streak"]["current_streak"], 6);
    assert_eq!(body["streak"]["longest_streak"], 10);
    assert_eq!(body["streak"]["status"], "active_today");

    app.clock.advance(chrono::Duration::hours(12));
    let (status, body) = app.update_streak("reader").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_none());

    assert_eq!(app.repo.write_count().await, 1);
}

#[tokio::test]
async fn test_update_streak_without_token_is_unauthorized() {
    let app = TestApp::new(vec![record("reader", 1, 1, at(1, 9))], at(2, 9));
    let request = Request::builder()
        .method("PUT")
        .uri("/profile/update-streak")
        .body(Body::empty())
        .unwrap();

    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.unwrap()["code"], 1001);
    assert_eq!(app.repo.write_count().await, 0);
}

#[tokio::test]
async fn test_update_streak_with_bad_token_is_unauthorized() {
    let app = TestApp::new(vec![record("reader", 1, 1, at(1, 9))], at(2, 9));
    let request = Request::builder()
        .method("PUT")
        .uri("/profile/update-streak")
        .header(AUTHORIZATION, "Bearer forged.token.value")
        .body(Body::empty())
        .unwrap();

    let (status, _) = app.send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_streak_for_unprovisioned_user_is_not_found() {
    let app = TestApp::new(vec![], at(2, 9));

    let (status, body) = app.update_streak("stranger").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let body = body.unwrap();
    assert_eq!(body["code"], 2002);
    assert_eq!(body["recoverable"], false);
}

#[tokio::test]
async fn test_get_streak_accepts_cookie_token() {
    let app = TestApp::new(vec![record("reader", 3, 8, at(9, 12))], at(12, 8));
    let request = Request::builder()
        .uri("/profile/streak")
        .header(COOKIE, format!("access_token={}", app.token("reader")))
        .body(Body::empty())
        .unwrap();

    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["current_streak"], 3);
    assert_eq!(body["longest_streak"], 8);
    assert_eq!(body["last_active_date"], "2024-06-09");
    assert_eq!(body["status"], "broken");
    assert_eq!(app.repo.write_count().await, 0);
}
