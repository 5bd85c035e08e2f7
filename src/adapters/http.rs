use crate::core::engine::ScreeningEngine;
use crate::domain::model::{ErrorEnvelope, PredictionResponse};
use crate::utils::error::{Result, ScreenError};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    loaded_at: String,
    artifacts: String,
}

impl IntoResponse for ScreenError {
    fn into_response(self) -> Response {
        let (status, message) = if self.is_client_error() {
            (StatusCode::BAD_REQUEST, self.to_string())
        } else {
            tracing::error!("❌ Prediction failed: {} (Category: {:?})", self, self.category());
            (StatusCode::INTERNAL_SERVER_ERROR, self.user_friendly_message())
        };
        (status, Json(ErrorEnvelope { error: message })).into_response()
    }
}

pub fn router(engine: ScreeningEngine) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .with_state(engine)
}

/// Serve until the listener fails. The engine must already hold a loaded bundle.
pub async fn serve(listener: TcpListener, engine: ScreeningEngine) -> Result<()> {
    axum::serve(listener, router(engine)).await?;
    Ok(())
}

async fn home() -> &'static str {
    "Heart Disease Predictor"
}

async fn health(State(engine): State<ScreeningEngine>) -> Json<HealthResponse> {
    let bundle = engine.bundle();
    Json(HealthResponse {
        status: "ok",
        loaded_at: bundle.loaded_at.to_rfc3339(),
        artifacts: bundle.source.clone(),
    })
}

async fn predict(
    State(engine): State<ScreeningEngine>,
    body: Bytes,
) -> Result<Json<PredictionResponse>> {
    // 空的 body 視同沒有 features
    let payload: serde_json::Value = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|e| ScreenError::MalformedPayload {
            message: e.to_string(),
        })?
    };

    let result = engine.predict_payload(&payload)?;
    Ok(Json(result.to_response()))
}
