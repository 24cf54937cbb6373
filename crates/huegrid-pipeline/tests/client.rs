mod common;

use axum::{extract::Query, http::StatusCode, response::IntoResponse, routing::get, Router};
use common::color_body;
use huegrid_core::{AggregationError, ApiConfig, FailureReason, HueQuery, Percent, SwatchParams};
use huegrid_pipeline::{ColorAggregator, ColorApiClient, ColorFetcher};
use serde::Deserialize;
use std::sync::{Arc, Mutex};

/// Mock color naming service on an ephemeral local port.
struct MockColorApi {
    base_url: String,
}

impl MockColorApi {
    async fn start(router: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Self {
            base_url: format!("http://{}", addr),
        }
    }

    fn client(&self) -> ColorApiClient {
        ColorApiClient::new(&ApiConfig {
            base_url: self.base_url.clone(),
            timeout_secs: 5,
        })
        .unwrap()
    }
}

#[derive(Debug, Deserialize)]
struct IdQuery {
    hsl: String,
}

/// Parses `(h,s%,l%)`.
fn parse_hsl(raw: &str) -> Option<(u16, u8, u8)> {
    let inner = raw.strip_prefix('(')?.strip_suffix(')')?;
    let mut parts = inner.split(',');
    let h = parts.next()?.parse().ok()?;
    let s = parts.next()?.strip_suffix('%')?.parse().ok()?;
    let l = parts.next()?.strip_suffix('%')?.parse().ok()?;
    Some((h, s, l))
}

async fn named_by_thirty_degrees(Query(query): Query<IdQuery>) -> impl IntoResponse {
    match parse_hsl(&query.hsl) {
        Some((h, s, l)) => {
            let hex = format!("#{:03X}{:02X}{:X}", h, s, l % 16);
            let body = color_body(&format!("Sector {}", h / 30), h, s, l, &hex);
            (StatusCode::OK, body)
        }
        None => (StatusCode::BAD_REQUEST, "bad hsl".to_string()),
    }
}

fn params(s: u8, l: u8) -> SwatchParams {
    SwatchParams::new(Percent::new(s).unwrap(), Percent::new(l).unwrap())
}

#[tokio::test]
async fn sends_hsl_triple_as_query_parameter() {
    let captured: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&captured);
    let router = Router::new().route(
        "/id",
        get(move |Query(query): Query<IdQuery>| {
            let sink = Arc::clone(&sink);
            async move {
                sink.lock().unwrap().push(query.hsl.clone());
                named_by_thirty_degrees(Query(query)).await
            }
        }),
    );
    let api = MockColorApi::start(router).await;

    let query = params(100, 34).query(HueQuery::new(215).unwrap());
    let response = api.client().fetch(query).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(captured.lock().unwrap().as_slice(), ["(215,100%,34%)"]);
    assert!(response.body.contains("Sector 7"));
}

#[tokio::test]
async fn aggregates_against_http_service() {
    let api = MockColorApi::start(Router::new().route("/id", get(named_by_thirty_degrees))).await;
    let aggregator = ColorAggregator::new(api.client());

    let collection = aggregator
        .aggregate(Percent::new(70).unwrap(), Percent::new(45).unwrap())
        .await
        .unwrap();

    assert_eq!(collection.len(), 12);
    let names: Vec<&str> = collection.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names.first(), Some(&"Sector 0"));
    assert_eq!(names.last(), Some(&"Sector 11"));
    assert!(collection.iter().all(|r| r.hsl.s == 70 && r.hsl.l == 45));
}

#[tokio::test]
async fn server_error_on_one_hue_fails_batch() {
    let router = Router::new().route(
        "/id",
        get(|Query(query): Query<IdQuery>| async move {
            if query.hsl.starts_with("(42,") {
                (StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()).into_response()
            } else {
                named_by_thirty_degrees(Query(query)).await.into_response()
            }
        }),
    );
    let api = MockColorApi::start(router).await;
    let aggregator = ColorAggregator::new(api.client());

    let err = aggregator
        .aggregate(Percent::new(100).unwrap(), Percent::new(50).unwrap())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AggregationError::PartialBatch {
            failed: 1,
            total: 360,
            status: 500,
        }
    );
}

#[tokio::test]
async fn unreachable_service_is_a_network_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ColorApiClient::new(&ApiConfig {
        base_url: format!("http://{}", addr),
        timeout_secs: 2,
    })
    .unwrap();
    let aggregator = ColorAggregator::new(client);

    let err = aggregator
        .aggregate(Percent::new(100).unwrap(), Percent::new(50).unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.reason(), FailureReason::NetworkFailure);
}
