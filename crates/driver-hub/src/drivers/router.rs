use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::{DriverError, DriverId};
use super::filter::{parse_instant, DateRange, DriverQuery, HistoryQuery, Selection};
use super::profile::ProfileTab;
use super::provider::DriverDirectory;
use super::service::DriverDeskService;

/// Router builder exposing the read-only driver endpoints.
pub fn driver_router<D>(service: Arc<DriverDeskService<D>>) -> Router
where
    D: DriverDirectory + 'static,
{
    Router::new()
        .route("/api/v1/drivers", get(roster_handler::<D>))
        .route("/api/v1/drivers/:driver_id", get(header_handler::<D>))
        .route(
            "/api/v1/drivers/:driver_id/tabs/:tab",
            get(tab_handler::<D>),
        )
        .route(
            "/api/v1/drivers/:driver_id/history",
            get(timeline_handler::<D>),
        )
        .route(
            "/api/v1/drivers/:driver_id/history.csv",
            get(export_handler::<D>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub struct RosterParams {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl RosterParams {
    pub fn into_query(self) -> Result<DriverQuery, DriverError> {
        let status = match self.status.as_deref() {
            Some(raw) => raw.parse()?,
            None => Selection::All,
        };
        Ok(DriverQuery::new(self.search.unwrap_or_default(), status))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub range: Option<String>,
    /// Evaluation instant override (RFC 3339 or YYYY-MM-DD); defaults to the wall clock.
    pub now: Option<String>,
}

impl HistoryParams {
    pub fn into_query(self) -> Result<(HistoryQuery, DateTime<Utc>), DriverError> {
        let kind = match self.kind.as_deref() {
            Some(raw) => raw.parse()?,
            None => Selection::All,
        };
        let range = match self.range.as_deref() {
            Some(raw) => raw.parse()?,
            None => DateRange::All,
        };
        let now = match self.now.as_deref() {
            Some(raw) => parse_instant(raw)?,
            None => Utc::now(),
        };
        Ok((
            HistoryQuery::new(self.search.unwrap_or_default(), kind, range),
            now,
        ))
    }
}

pub fn status_for(error: &DriverError) -> StatusCode {
    match error {
        DriverError::NotFound(_) => StatusCode::NOT_FOUND,
        DriverError::UnknownDiscriminant { .. }
        | DriverError::UnknownTab(_)
        | DriverError::InvalidValue { .. } => StatusCode::BAD_REQUEST,
        DriverError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: DriverError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (status_for(&error), axum::Json(payload)).into_response()
}

pub(crate) async fn roster_handler<D>(
    State(service): State<Arc<DriverDeskService<D>>>,
    Query(params): Query<RosterParams>,
) -> Response
where
    D: DriverDirectory + 'static,
{
    match params.into_query() {
        Ok(query) => (StatusCode::OK, axum::Json(service.roster(query))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn header_handler<D>(
    State(service): State<Arc<DriverDeskService<D>>>,
    Path(driver_id): Path<String>,
) -> Response
where
    D: DriverDirectory + 'static,
{
    match service.header(&DriverId(driver_id)) {
        Ok(header) => (StatusCode::OK, axum::Json(header)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn tab_handler<D>(
    State(service): State<Arc<DriverDeskService<D>>>,
    Path((driver_id, tab)): Path<(String, String)>,
    Query(params): Query<HistoryParams>,
) -> Response
where
    D: DriverDirectory + 'static,
{
    let result = tab
        .parse::<ProfileTab>()
        .and_then(|tab| params.into_query().map(|(query, now)| (tab, query, now)))
        .and_then(|(tab, query, now)| service.tab(&DriverId(driver_id), tab, query, now));

    match result {
        Ok(content) => (StatusCode::OK, axum::Json(content)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn timeline_handler<D>(
    State(service): State<Arc<DriverDeskService<D>>>,
    Path(driver_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Response
where
    D: DriverDirectory + 'static,
{
    let result = params
        .into_query()
        .and_then(|(query, now)| service.timeline(&DriverId(driver_id), query, now));

    match result {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler<D>(
    State(service): State<Arc<DriverDeskService<D>>>,
    Path(driver_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Response
where
    D: DriverDirectory + 'static,
{
    let id = DriverId(driver_id);
    let result = params
        .into_query()
        .and_then(|(query, now)| service.export_history(&id, &query, now));

    match result {
        Ok(csv) => {
            let disposition = format!("attachment; filename=\"fahrer-{id}-verlauf.csv\"");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response()
        }
        Err(error) => error_response(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::provider::SampleDirectory;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> Router {
        driver_router(Arc::new(DriverDeskService::new(Arc::new(
            SampleDirectory::new(),
        ))))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn roster_filters_by_status() {
        let (status, body) = get_json("/api/v1/drivers?status=active").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["headline"], "3 von 5 Fahrern");
        assert_eq!(body["drivers"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn unknown_status_is_bad_request() {
        let (status, body) = get_json("/api/v1/drivers?status=retired").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("driver status"));
    }

    #[tokio::test]
    async fn unknown_driver_is_not_found() {
        let (status, _) = get_json("/api/v1/drivers/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn tab_endpoint_tags_content() {
        let (status, body) = get_json("/api/v1/drivers/1/tabs/platforms").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tab"], "platforms");
        assert_eq!(body["summary"]["active"], 2);

        let (status, _) = get_json("/api/v1/drivers/1/tabs/billing").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn history_honours_now_override() {
        let (status, body) =
            get_json("/api/v1/drivers/1/history?range=today&now=2024-01-15T18:00:00Z").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["shown"], 1);
        assert_eq!(body["groups"][0]["key"], "15.1.2024");
    }

    #[tokio::test]
    async fn now_accepts_bare_dates_and_rejects_garbage_as_json() {
        let (status, body) =
            get_json("/api/v1/drivers/1/history?range=today&now=2024-01-15").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["shown"], 1);
        assert_eq!(body["groups"][0]["entries"][0]["relative"], "Vor wenigen Minuten");

        let (status, body) = get_json("/api/v1/drivers/1/history?now=15.1.2024").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("15.1.2024"));

        let (status, body) = get_json("/api/v1/drivers/1/tabs/history?now=yesterday").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("RFC 3339"));
    }

    #[tokio::test]
    async fn export_returns_csv() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/drivers/1/history.csv?type=document")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert_eq!(body.lines().count(), 2);
        assert!(body.contains("Führerschein erneuert"));
    }
}
