//! HTTP surface: a single `/weather` route backed by a [`WeatherProvider`].

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{ConnectInfo, Query, Request, State},
    http::{HeaderName, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::any,
};
use chrono::Utc;
use serde::Serialize;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;
use weather_core::{Config, WeatherProvider, WeatherQuery, compose};

pub const CORRELATION_ID_HEADER: HeaderName = HeaderName::from_static("x-correlation-id");

const METHOD_NOT_ALLOWED_MSG: &str = "Only GET method is allowed";
const MISSING_COORDINATES_MSG: &str = "lat and lon parameters are required";
const GENERIC_UPSTREAM_MSG: &str = "upstream weather service error";

/// Shared, read-only handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
    pub expose_upstream_errors: bool,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    correlation_id: &'a str,
}

pub fn router(state: AppState) -> Router {
    // Any method is routed here so that the 405 carries the JSON error body.
    Router::new()
        .route("/weather", any(weather))
        .with_state(state)
}

/// Bind on all interfaces and serve until Ctrl-C or SIGTERM.
pub async fn serve(config: &Config, provider: Arc<dyn WeatherProvider>) -> anyhow::Result<()> {
    let state = AppState {
        provider,
        expose_upstream_errors: config.expose_upstream_errors,
    };

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {addr}"))?;
    info!(%addr, "starting server");

    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("HTTP server failed")?;

    info!("server stopped");
    Ok(())
}

async fn weather(State(state): State<AppState>, request: Request) -> Response {
    let correlation_id = new_correlation_id();
    let span = info_span!("request", correlation_id = %correlation_id);
    handle_weather(state, request, correlation_id)
        .instrument(span)
        .await
}

async fn handle_weather(state: AppState, request: Request, correlation_id: String) -> Response {
    let (parts, _body) = request.into_parts();

    let client = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let user_agent = parts
        .headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    info!(
        method = %parts.method,
        uri = %parts.uri,
        client = %client,
        user_agent = %user_agent,
        timestamp = %Utc::now().to_rfc2822(),
        "received request"
    );

    if parts.method != Method::GET {
        return error_response(
            StatusCode::METHOD_NOT_ALLOWED,
            METHOD_NOT_ALLOWED_MSG,
            &correlation_id,
        );
    }

    // Repeated keys resolve to their first occurrence. An undecodable query
    // string counts as missing coordinates.
    let params = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
        .map(|Query(pairs)| pairs)
        .unwrap_or_default();
    let query =
        WeatherQuery::from_params(first_value(&params, "lat"), first_value(&params, "lon"));
    let Some(query) = query else {
        return error_response(
            StatusCode::BAD_REQUEST,
            MISSING_COORDINATES_MSG,
            &correlation_id,
        );
    };

    let outcome = state
        .provider
        .current_weather(&query)
        .await
        .and_then(|upstream| compose(&upstream));

    match outcome {
        Ok(weather) => {
            info!(
                status = StatusCode::OK.as_u16(),
                weather_condition = %weather.weather_condition,
                temperature = %weather.temperature,
                temperature_condition = %weather.temperature_condition,
                "request served"
            );
            json_response(StatusCode::OK, &correlation_id, &weather)
        }
        Err(err) => {
            let detail = err.to_string();
            let message = if state.expose_upstream_errors {
                detail.as_str()
            } else {
                error!(error = %detail, "upstream failure hidden from client");
                GENERIC_UPSTREAM_MSG
            };
            error_response(StatusCode::INTERNAL_SERVER_ERROR, message, &correlation_id)
        }
    }
}

fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

fn new_correlation_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn error_response(status: StatusCode, message: &str, correlation_id: &str) -> Response {
    if status.is_server_error() {
        error!(status = status.as_u16(), error = message, "request failed");
    } else {
        warn!(status = status.as_u16(), error = message, "request rejected");
    }

    let body = ErrorBody {
        error: message,
        correlation_id,
    };
    json_response(status, correlation_id, &body)
}

fn json_response<T: Serialize>(status: StatusCode, correlation_id: &str, body: &T) -> Response {
    let headers = [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (CORRELATION_ID_HEADER, correlation_id.to_string()),
    ];
    (status, headers, Json(body)).into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
