use axum::{
    body::{Body, Bytes},
    http::{Method, Request, StatusCode, header},
};
use diesel::prelude::*;
use http_body_util::BodyExt;
use serde_json::Value;
use showroll_api::{
    AppContext, Config,
    models::{Appearance, Episode, Guest, NewAppearance, NewEpisode, NewGuest, Rating},
    schema::{appearances, episodes},
};
use tempfile::TempDir;
use tower::ServiceExt;

/// A migrated service backed by a throwaway SQLite file.
pub struct TestApp {
    pub context: AppContext,
    _dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    pub fn with_config(customize: impl FnOnce(&mut Config)) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");

        let mut config = Config {
            database_url: dir
                .path()
                .join("showroll.db")
                .to_string_lossy()
                .into_owned(),
            pool_size: 2,
            pretty_json: false,
            ..Config::default()
        };
        customize(&mut config);

        let context =
            AppContext::connect(config).expect("failed to create app context");

        Self { context, _dir: dir }
    }

    /// Runs `f` against a pooled connection, outside of any request.
    pub fn with_conn<T>(&self, f: impl FnOnce(&mut SqliteConnection) -> T) -> T {
        let mut pooled = self.context.pool().get().expect("no connection");
        let conn: &mut SqliteConnection = &mut pooled;
        f(conn)
    }

    pub fn episode(&self, date: &str, number: &str) -> Episode {
        self.with_conn(|conn| {
            Episode::create(
                conn,
                &NewEpisode {
                    date: date.to_string(),
                    number: number.to_string(),
                },
            )
            .expect("failed to insert episode")
        })
    }

    pub fn guest(&self, name: &str, occupation: &str) -> Guest {
        self.with_conn(|conn| {
            Guest::create(
                conn,
                &NewGuest {
                    name: name.to_string(),
                    occupation: occupation.to_string(),
                },
            )
            .expect("failed to insert guest")
        })
    }

    pub fn appearance(&self, rating: i32, episode: &Episode, guest: &Guest) -> Appearance {
        let record = NewAppearance::new(
            Rating::new(rating).expect("invalid rating"),
            episode.id,
            guest.id,
        );
        self.with_conn(|conn| {
            Appearance::create(conn, &record).expect("failed to insert appearance")
        })
    }

    pub fn episode_count(&self) -> i64 {
        self.with_conn(|conn| {
            episodes::table.count().get_result(conn).expect("count failed")
        })
    }

    pub fn appearance_count(&self) -> i64 {
        self.with_conn(|conn| {
            appearances::table
                .count()
                .get_result(conn)
                .expect("count failed")
        })
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Bytes) {
        let response = showroll_api::app(self.context.clone())
            .oneshot(request)
            .await
            .expect("router failed");

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();

        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("bad request");

        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).expect("body is not JSON"))
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Bytes) {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .expect("bad request");

        self.send(request).await
    }

    pub async fn post_raw(&self, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .expect("bad request");

        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).expect("body is not JSON"))
    }

    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.post_raw(uri, body.to_string()).await
    }
}
