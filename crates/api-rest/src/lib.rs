//! # API REST
//!
//! HTTP surface for the disease dashboard.
//!
//! Handles:
//! - the server-rendered dashboard page (`GET /`)
//! - the JSON report endpoint (`POST /api/report`)
//! - health checks and OpenAPI/Swagger documentation
//!
//! Uses `api-shared` for wire types and `dashboard-core` for the pipeline.

#![warn(rust_2018_idioms)]

pub mod html;

use api_shared::{HealthRes, HealthService, ParseErrorRes, ReportReq};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use dashboard_core::{
    BarChart, ChartSeries, Dashboard, DashboardService, MedicationPanel, RecoveryOptionSection,
    ReferenceLink, RenderOutcome, Severity, SideEffectLine,
};
use html::{render_failure_page, render_page, PageContent};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    service: DashboardService,
}

impl AppState {
    pub fn new(service: DashboardService) -> Self {
        Self { service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, dashboard_page, create_report),
    components(schemas(
        HealthRes,
        ReportReq,
        ParseErrorRes,
        Dashboard,
        BarChart,
        ChartSeries,
        RecoveryOptionSection,
        MedicationPanel,
        SideEffectLine,
        Severity,
        ReferenceLink,
    ))
)]
pub struct ApiDoc;

/// Query string of the dashboard page.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Disease name typed into the input field.
    #[serde(default)]
    pub disease: Option<String>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/health", get(health))
        .route("/api/report", post(create_report))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used for monitoring.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard page", content_type = "text/html", body = String),
        (status = 500, description = "Lookup failed", content_type = "text/html", body = String)
    )
)]
/// Dashboard page.
///
/// Without a disease name only the title and input form are shown and no
/// request is made. With one, the page blocks until the model has answered
/// and then shows the statistics chart, the tabs and the reference link, or
/// the parse error if the answer was not JSON.
///
/// # Errors
/// Returns `500 Internal Server Error` with a generic failure page if the
/// request fails or the answer does not match the report schema.
#[axum::debug_handler]
async fn dashboard_page(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let input = query.disease.unwrap_or_default();

    match state.service.lookup(&input).await {
        Ok(None) => Ok(Html(render_page(&input, PageContent::Empty))),
        Ok(Some(RenderOutcome::Rendered(dashboard))) => Ok(Html(render_page(
            &input,
            PageContent::Dashboard(&dashboard),
        ))),
        Ok(Some(RenderOutcome::ParseFailed(failure))) => Ok(Html(render_page(
            &input,
            PageContent::ParseFailed(&failure),
        ))),
        Err(e) => {
            tracing::error!("Dashboard lookup error: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_failure_page(&input)),
            ))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/report",
    request_body = ReportReq,
    responses(
        (status = 200, description = "Rendered dashboard", body = Dashboard),
        (status = 400, description = "Malformed request body or empty disease name"),
        (status = 422, description = "Model reply was not valid JSON", body = ParseErrorRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Look up a disease and return the dashboard as JSON.
///
/// # Errors
/// - `400 Bad Request` if the body is not a `ReportReq` or `disease_name` is empty
/// - `422 Unprocessable Entity` if the model's reply is not JSON
/// - `500 Internal Server Error` for every other fault
#[axum::debug_handler]
async fn create_report(
    State(state): State<AppState>,
    payload: Result<Json<ReportReq>, JsonRejection>,
) -> Result<Json<Dashboard>, Response> {
    // 422 is reserved for unparseable model replies.
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!("Rejected report request body: {}", rejection.body_text());
        (StatusCode::BAD_REQUEST, rejection.body_text()).into_response()
    })?;

    match state.service.lookup(&req.disease_name).await {
        Ok(Some(RenderOutcome::Rendered(dashboard))) => Ok(Json(dashboard)),
        Ok(Some(RenderOutcome::ParseFailed(failure))) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ParseErrorRes {
                message: failure.message,
            }),
        )
            .into_response()),
        Ok(None) => Err((StatusCode::BAD_REQUEST, "disease_name cannot be empty").into_response()),
        Err(e) => {
            tracing::error!("Report lookup error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response())
        }
    }
}
