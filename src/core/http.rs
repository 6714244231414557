//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::config::DashboardConfig;
use crate::core::pipeline::{
    analyze_asset, load_dashboard, parse_days, validate_asset_id, DashboardError,
};
use crate::metrics::Metrics;
use crate::models::analysis::Analysis;
use crate::models::market::Asset;
use crate::presentation::chart::{render_chart_svg, ChartError};
use crate::presentation::page::{render_dashboard, render_error_page, DashboardView};
use crate::services::market_data::MarketDataProvider;
use crate::signals::error::AnalysisError;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub config: Arc<DashboardConfig>,
    pub provider: Arc<dyn MarketDataProvider>,
}

impl AppState {
    pub fn new(
        config: DashboardConfig,
        provider: Arc<dyn MarketDataProvider>,
    ) -> Result<Self, prometheus::Error> {
        Ok(Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics: Arc::new(Metrics::new()?),
            start_time: Arc::new(Instant::now()),
            config: Arc::new(config),
            provider,
        })
    }

    /// Record the analysis outcome and whether the provider answered
    async fn observe(&self, error: Option<&AnalysisError>) {
        self.metrics
            .record_analysis(error.map_or("ok", AnalysisError::outcome));

        let mut health = self.health.write().await;
        match error {
            Some(AnalysisError::Provider(e)) => health.provider_failed(e.to_string()),
            Some(AnalysisError::InvalidRequest(_)) => {}
            _ => health.provider_answered(),
        }
    }
}

/// Service health, degraded while the last provider call failed
#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
    pub last_provider_error: Option<String>,
}

impl HealthStatus {
    fn provider_failed(&mut self, error: String) {
        self.status = "degraded".to_string();
        self.last_provider_error = Some(error);
    }

    fn provider_answered(&mut self) {
        self.status = "healthy".to_string();
        self.last_provider_error = None;
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
            last_provider_error: None,
        }
    }
}

/// Dashboard failures, each mapped to a status code and a readable message
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Load(#[from] DashboardError),

    #[error("{source}")]
    Chart { source: ChartError, assets: Vec<Asset> },
}

impl PageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PageError::Load(e) => e.source.status_code(),
            PageError::Chart { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            PageError::Load(e) => e.source.user_message(),
            PageError::Chart { .. } => {
                "Error loading data: the chart could not be rendered".to_string()
            }
        }
    }

    /// Listing to keep in the selector on the error page
    pub fn assets(&self) -> &[Asset] {
        match self {
            PageError::Load(e) => &e.assets,
            PageError::Chart { assets, .. } => assets,
        }
    }
}

/// JSON error body for the `/api` routes
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        Self {
            status: e.status_code(),
            message: e.user_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

fn log_failure(asset_id: &str, status: StatusCode, err: &dyn std::error::Error) {
    if status.is_server_error() {
        error!(asset_id = %asset_id, status = %status, error = %err, "Analysis request failed");
    } else {
        warn!(asset_id = %asset_id, status = %status, error = %err, "Analysis request rejected");
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "last_provider_error": health.last_provider_error,
        "uptime_seconds": uptime_seconds,
        "service": "coinlens-dashboard"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Dashboard selection, from the query string (GET) or the form body (POST)
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub coin: Option<String>,
    pub days: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalysisQuery {
    pub days: Option<String>,
}

async fn dashboard_get(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    dashboard_page(&state, query).await
}

async fn dashboard_post(State(state): State<AppState>, Form(form): Form<DashboardQuery>) -> Response {
    dashboard_page(&state, form).await
}

async fn dashboard_page(state: &AppState, query: DashboardQuery) -> Response {
    let selected = query
        .coin
        .as_deref()
        .map(str::trim)
        .filter(|coin| !coin.is_empty())
        .unwrap_or(state.config.default_coin.as_str())
        .to_string();

    match build_dashboard(state, &selected, query.days.as_deref()).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            let status = err.status_code();
            log_failure(&selected, status, &err);
            let days = parse_days(query.days.as_deref(), state.config.default_days)
                .unwrap_or(state.config.default_days);
            let html = render_error_page(&err.user_message(), err.assets(), &selected, days);
            (status, Html(html)).into_response()
        }
    }
}

async fn build_dashboard(
    state: &AppState,
    selected: &str,
    days: Option<&str>,
) -> Result<String, PageError> {
    let loaded = async {
        let asset_id = validate_asset_id(selected)?;
        let days = parse_days(days, state.config.default_days)?;
        let data = load_dashboard(
            state.provider.as_ref(),
            state.config.asset_limit,
            &asset_id,
            days,
        )
        .await?;
        Ok::<_, DashboardError>((asset_id, days, data))
    }
    .await;
    state.observe(loaded.as_ref().err().map(|e| &e.source)).await;
    let (asset_id, days, data) = loaded?;

    let chart_svg = render_chart_svg(&asset_id, &data.analysis.series).map_err(|source| {
        PageError::Chart {
            source,
            assets: data.assets.clone(),
        }
    })?;
    Ok(render_dashboard(&DashboardView {
        assets: &data.assets,
        selected: &asset_id,
        days,
        summary: &data.analysis.summary,
        chart_svg: &chart_svg,
    }))
}

/// List assets ranked by market cap
async fn list_assets(State(state): State<AppState>) -> Result<Json<Vec<Asset>>, ApiError> {
    let assets = state
        .provider
        .list_assets(state.config.asset_limit)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to load asset listing");
            AnalysisError::from(e)
        })?;
    Ok(Json(assets))
}

/// Summary and annotated series for one asset
async fn get_analysis(
    State(state): State<AppState>,
    Path(coin): Path<String>,
    Query(params): Query<AnalysisQuery>,
) -> Result<Json<Analysis>, ApiError> {
    let result: Result<Analysis, AnalysisError> = async {
        let asset_id = validate_asset_id(&coin)?;
        let days = parse_days(params.days.as_deref(), state.config.default_days)?;
        analyze_asset(state.provider.as_ref(), &asset_id, days).await
    }
    .await;
    state.observe(result.as_ref().err()).await;

    result.map(Json).map_err(|e| {
        log_failure(&coin, e.status_code(), &e);
        ApiError::from(e)
    })
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_get).post(dashboard_post))
        .route("/api/assets", get(list_assets))
        .route("/api/analysis/{coin}", get(get_analysis))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    config: DashboardConfig,
    provider: Arc<dyn MarketDataProvider>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.bind_addr();
    let state = AppState::new(config, provider)?;
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(address = %addr, "Dashboard listening on http://{}", addr);
    info!("Metrics endpoint available at http://{}/metrics", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutting down dashboard...");
}
