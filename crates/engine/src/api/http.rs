//! HTTP routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use std::sync::Arc;

use charvault_domain::{DamageType, HealthPool};

use crate::app::App;
use crate::infrastructure::persistence::CharacterRecord;
use crate::use_cases::HealthError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(service_status))
        .route("/api/characters/{name}", get(get_character))
        .route("/api/characters/{name}/health", get(get_character_health))
        .route(
            "/api/damage/{name}/type/{damage_type}/amount/{amount}",
            put(damage_character),
        )
        .route("/api/heal/{name}/amount/{amount}", put(heal_character))
        .route("/api/temphp/{name}/amount/{amount}", put(give_temp_hp))
        .fallback(not_found)
}

async fn service_status() -> &'static str {
    "OK"
}

async fn get_character(
    State(app): State<Arc<App>>,
    Path(name): Path<String>,
) -> Result<Json<CharacterRecord>, ApiError> {
    let character = app.health.character(&name).await?;
    Ok(Json(CharacterRecord::from(&character)))
}

async fn get_character_health(
    State(app): State<Arc<App>>,
    Path(name): Path<String>,
) -> Result<Json<HealthPool>, ApiError> {
    let pool = app.health.health(&name).await?;
    Ok(Json(pool))
}

async fn damage_character(
    State(app): State<Arc<App>>,
    Path((name, damage_type, amount)): Path<(String, String, u32)>,
) -> Result<Json<HealthPool>, ApiError> {
    // Reject unknown damage types before the engine sees them; the rules
    // are typed so nothing unknown can slip through anyway
    let damage_type: DamageType = damage_type
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Unknown damage type: {damage_type}")))?;
    let amount = bounded_amount(amount)?;
    let pool = app.health.damage(&name, damage_type, amount).await?;
    Ok(Json(pool))
}

async fn heal_character(
    State(app): State<Arc<App>>,
    Path((name, amount)): Path<(String, u32)>,
) -> Result<Json<HealthPool>, ApiError> {
    let amount = bounded_amount(amount)?;
    let pool = app.health.heal(&name, amount).await?;
    Ok(Json(pool))
}

async fn give_temp_hp(
    State(app): State<Arc<App>>,
    Path((name, amount)): Path<(String, u32)>,
) -> Result<Json<HealthPool>, ApiError> {
    let amount = bounded_amount(amount)?;
    let pool = app.health.grant_temp_hp(&name, amount).await?;
    Ok(Json(pool))
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": true, "message": "Check your URL please" })),
    )
}

/// The route parses amounts unsigned, so negatives are already gone;
/// this bounds them to what the rules arithmetic accepts.
fn bounded_amount(amount: u32) -> Result<i32, ApiError> {
    i32::try_from(amount)
        .map_err(|_| ApiError::BadRequest(format!("Amount out of range: {amount}")))
}

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl From<HealthError> for ApiError {
    fn from(err: HealthError) -> Self {
        match err {
            HealthError::CharacterNotFound(_) => ApiError::NotFound,
            HealthError::Domain(e) => ApiError::BadRequest(e.to_string()),
            HealthError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, "Character not found").into_response()
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charvault_domain::DomainError;
    use crate::infrastructure::ports::RepoError;

    #[test]
    fn bounded_amount_accepts_normal_values() {
        assert_eq!(bounded_amount(55).expect("in range"), 55);
    }

    #[test]
    fn bounded_amount_rejects_overflow() {
        assert!(matches!(
            bounded_amount(u32::MAX),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::from(HealthError::CharacterNotFound("briv".into()));
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn domain_errors_map_to_400() {
        let err = ApiError::from(HealthError::Domain(DomainError::precondition(
            "no pool",
        )));
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn repo_errors_map_to_500() {
        let err = ApiError::from(HealthError::Repo(RepoError::Io("disk".into())));
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
