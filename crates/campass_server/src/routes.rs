//! Route table and generic record handlers.
//!
//! | Method | Path              | Operation        |
//! |--------|-------------------|------------------|
//! | GET    | /{kind}s          | list             |
//! | POST   | /{kind}s          | create           |
//! | PUT    | /{kind}s/{id}     | full replace     |
//! | DELETE | /{kind}s/{id}     | idempotent delete|
//!
//! Notes have no PUT route.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use campass_core::{
    core_version, ping, DeadlineFields, EventFields, NoteFields, Record, RecordId, RecordSchema,
    RecordService, SqliteRecordRepository, Stored,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

/// Builds the full application router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/deadlines",
            get(list_records::<DeadlineFields>).post(create_record::<DeadlineFields>),
        )
        .route(
            "/deadlines/:id",
            put(update_record::<DeadlineFields>).delete(delete_record::<DeadlineFields>),
        )
        .route(
            "/events",
            get(list_records::<EventFields>).post(create_record::<EventFields>),
        )
        .route(
            "/events/:id",
            put(update_record::<EventFields>).delete(delete_record::<EventFields>),
        )
        // The companion client deletes events under this prefix.
        .route("/api/events/:id", delete(delete_record::<EventFields>))
        .route(
            "/notes",
            get(list_records::<NoteFields>).post(create_record::<NoteFields>),
        )
        .route("/notes/:id", delete(delete_record::<NoteFields>))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": ping(), "version": core_version() }))
}

async fn list_records<F>(State(state): State<AppState>) -> Result<Json<Vec<Stored<F>>>, ApiError>
where
    F: RecordSchema + Serialize + Send + 'static,
{
    let records = state.with_conn(|conn| service::<F>(conn)?.list()).await?;
    Ok(Json(records))
}

async fn create_record<F>(
    State(state): State<AppState>,
    Json(draft): Json<F::Draft>,
) -> Result<Json<Stored<F>>, ApiError>
where
    F: RecordSchema + Serialize + Send + 'static,
    <F as Record>::Draft: DeserializeOwned + Send + 'static,
{
    let created = state
        .with_conn(move |conn| service::<F>(conn)?.create(draft))
        .await?;
    Ok(Json(created))
}

async fn update_record<F>(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(fields): Json<F>,
) -> Result<Json<Stored<F>>, ApiError>
where
    F: RecordSchema + Serialize + DeserializeOwned + Send + 'static,
{
    let updated = state
        .with_conn(move |conn| service::<F>(conn)?.update(id, fields))
        .await?;
    Ok(Json(updated))
}

async fn delete_record<F>(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError>
where
    F: RecordSchema + Send + 'static,
{
    state
        .with_conn(move |conn| service::<F>(conn)?.delete(id))
        .await?;
    Ok(StatusCode::OK)
}

fn service<F: RecordSchema>(
    conn: &rusqlite::Connection,
) -> Result<RecordService<SqliteRecordRepository<'_, F>>, campass_core::ServiceError> {
    Ok(RecordService::new(SqliteRecordRepository::try_new(conn)?))
}
