use axum::{
    Router,
    extract::{
        Json, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::calculators::{catalog, evaluate_slug};
use crate::error::CalcError;

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/calculators", get(catalog_handler))
        .route(
            "/api/calc/:slug",
            get(calc_get_handler).post(calc_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("fincalc listening on http://{addr}");
    tracing::info!("Local access: http://127.0.0.1:{}/", addr.port());

    axum::serve(listener, router()).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn catalog_handler() -> Response {
    match catalog() {
        Ok(entries) => json_response(StatusCode::OK, entries),
        Err(e) => calc_error_response(&e),
    }
}

async fn calc_get_handler(
    Path(slug): Path<String>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return rejection_response(rejection.status(), &rejection.body_text()),
    };
    let raw: Map<String, Value> = params
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();
    calc_handler_impl(&slug, &raw)
}

async fn calc_post_handler(
    Path(slug): Path<String>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(body)) => calc_handler_impl(&slug, &body),
        Err(rejection) => rejection_response(rejection.status(), &rejection.body_text()),
    }
}

fn calc_handler_impl(slug: &str, raw: &Map<String, Value>) -> Response {
    tracing::debug!(slug, fields = raw.len(), "evaluating calculator");
    match evaluate_slug(slug, raw) {
        Ok(evaluation) => json_response(StatusCode::OK, evaluation),
        Err(e) => calc_error_response(&e),
    }
}

fn status_for(error: &CalcError) -> StatusCode {
    match error {
        CalcError::UnknownCalculator(_) => StatusCode::NOT_FOUND,
        CalcError::InvalidField { .. } | CalcError::Decode { .. } | CalcError::Query { .. } => {
            StatusCode::BAD_REQUEST
        }
        CalcError::Encode { .. } | CalcError::Reference { .. } | CalcError::Server { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn calc_error_response(error: &CalcError) -> Response {
    let status = status_for(error);
    if status.is_server_error() {
        tracing::error!("{error}");
    } else {
        tracing::warn!("{error}");
    }
    error_response(status, &error.to_string())
}

/// Extractor failures keep axum's status but use the JSON error shape.
fn rejection_response(status: StatusCode, reason: &str) -> Response {
    tracing::warn!(%status, "rejected request: {reason}");
    error_response(status, reason)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::extract::FromRequest;
    use axum::http::Request;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn query(pairs: &[(&str, &str)]) -> Result<Query<HashMap<String, String>>, QueryRejection> {
        Ok(Query(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    async fn json_body(
        content_type: Option<&str>,
        body: &'static str,
    ) -> Result<Json<Map<String, Value>>, JsonRejection> {
        let mut request = Request::builder().method("POST").uri("/api/calc/tip");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let request = request.body(Body::from(body)).expect("request");
        Json::from_request(request, &()).await
    }

    #[tokio::test]
    async fn catalog_lists_every_calculator_with_fields() {
        let response = catalog_handler().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
        let body = body_json(response).await;
        let entries = body.as_array().expect("array");
        assert_eq!(entries.len(), crate::calculators::registry().len());
        let loan = entries
            .iter()
            .find(|e| e["slug"] == "loan")
            .expect("loan entry");
        assert!(loan["fields"].as_array().is_some_and(|f| !f.is_empty()));
        assert!(loan["defaults"].is_object());
    }

    #[tokio::test]
    async fn get_evaluates_query_fields() {
        let response = calc_get_handler(
            Path("loan".to_string()),
            query(&[("principal", "12000"), ("annualRate", "0"), ("termMonths", "24")]),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["calculator"], "loan");
        assert_approx(body["result"]["monthlyPayment"].as_f64().expect("payment"), 500.0);
        assert!(body["shareQuery"].as_str().is_some_and(|q| q.starts_with("calc=loan&")));
        assert!(body["shareText"].is_string());
    }

    #[tokio::test]
    async fn post_accepts_json_numbers() {
        let mut body = Map::new();
        body.insert("bill".to_string(), Value::from(100.0));
        body.insert("tipPct".to_string(), Value::from(20));
        body.insert("people".to_string(), Value::from(4));
        let response = calc_post_handler(Path("tip".to_string()), Ok(Json(body))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_approx(body["result"]["perPerson"].as_f64().expect("per person"), 30.0);
    }

    #[tokio::test]
    async fn empty_result_is_null_not_an_error() {
        let response = calc_get_handler(Path("tip".to_string()), query(&[("bill", "0")])).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["result"].is_null());
        assert_eq!(body["cards"], Value::Array(Vec::new()));
    }

    #[tokio::test]
    async fn unknown_calculator_is_not_found() {
        let response = calc_get_handler(Path("crystal-ball".to_string()), query(&[])).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert!(body["error"].as_str().is_some_and(|e| e.contains("crystal-ball")));
    }

    #[tokio::test]
    async fn invalid_field_is_bad_request() {
        let response = calc_get_handler(
            Path("federal-tax".to_string()),
            query(&[("filingStatus", "widowed-pirate")]),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().is_some_and(|e| e.contains("filingStatus")));
    }

    #[tokio::test]
    async fn post_body_that_is_not_an_object_is_a_json_error() {
        let body = json_body(Some("application/json"), "[1, 2, 3]").await;
        assert!(body.is_err());
        let response = calc_post_handler(Path("tip".to_string()), body).await;
        assert!(response.status().is_client_error());
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
        let body = body_json(response).await;
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn post_without_json_content_type_is_a_json_error() {
        let body = json_body(None, r#"{"bill": 100}"#).await;
        let response = calc_post_handler(Path("tip".to_string()), body).await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(response.headers().contains_key(header::CACHE_CONTROL));
        let body = body_json(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn static_assets_are_served_uncached() {
        let css = styles_handler().await.into_response();
        assert_eq!(
            css.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
            Some(&b"text/css; charset=utf-8"[..])
        );
        assert!(css.headers().contains_key(header::CACHE_CONTROL));

        let index = index_handler().await.into_response();
        assert_eq!(index.status(), StatusCode::OK);
    }

    #[test]
    fn reference_failures_are_server_errors() {
        let err = CalcError::Reference {
            table: "gs_pay",
            reason: "broken".to_string(),
        };
        assert_eq!(status_for(&err), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            status_for(&CalcError::invalid_field("x", "bad")),
            StatusCode::BAD_REQUEST
        );
    }
}
