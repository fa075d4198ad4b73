//! Doctor listing endpoints.
//!
//! The listing is offset-paginated: clients page through with `page` and
//! `limit`, optionally narrowing by `name` (substring) and `specialty_id`.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::Host;
use uuid::Uuid;

use super::request_url;
use crate::app::AppState;
use crate::db::{DoctorFilter, DoctorRecord};
use crate::error::ApiError;
use crate::orm::{FilterSet, SelectQuery};
use crate::pagination::{OffsetPaginator, OffsetQuery, Page, Paginator};

async fn list_doctors(
    State(state): State<AppState>,
    Host(host): Host,
    OriginalUri(uri): OriginalUri,
    Query(pagination): Query<OffsetQuery>,
    Query(filter): Query<DoctorFilter>,
) -> Result<Json<Page<DoctorRecord>>, ApiError> {
    let params = pagination.validate(request_url(&host, &uri))?;

    let filters = FilterSet::new().with(filter);
    filters.validate()?;

    // Count and fetch run off the same builder so the metadata always
    // matches the page's WHERE clause.
    let query = filters.apply(SelectQuery::<DoctorRecord>::new());
    let total_count = query.count(state.db.pool()).await?;

    let paginator = OffsetPaginator::new(params);
    let query = paginator.paginate(query)?;
    let doctors = query.fetch_all(state.db.pool()).await?;

    let page = paginator.create_result(doctors, total_count)?;
    Ok(Json(page))
}

async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DoctorRecord>, ApiError> {
    let doctor = state
        .db
        .doctors()
        .get(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(doctor))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/doctors", get(list_doctors))
        .route("/doctors/{id}", get(get_doctor))
}
