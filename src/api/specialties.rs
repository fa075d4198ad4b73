//! Specialty listing endpoints.
//!
//! The listing is cursor-paginated: clients resume iteration with the
//! opaque `cursor` token and steer direction with `ordering`.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::Host;
use uuid::Uuid;

use super::request_url;
use crate::app::AppState;
use crate::db::{SpecialtyFilter, SpecialtyRecord};
use crate::error::ApiError;
use crate::orm::{FilterSet, SelectQuery};
use crate::pagination::{CursorPaginator, CursorQuery, Page, Paginator};

async fn list_specialties(
    State(state): State<AppState>,
    Host(host): Host,
    OriginalUri(uri): OriginalUri,
    Query(pagination): Query<CursorQuery>,
    Query(filter): Query<SpecialtyFilter>,
) -> Result<Json<Page<SpecialtyRecord>>, ApiError> {
    let params = pagination.validate(request_url(&host, &uri))?;

    let filters = FilterSet::new().with(filter);
    filters.validate()?;

    let query = filters.apply(SelectQuery::<SpecialtyRecord>::new());
    let total_count = query.count(state.db.pool()).await?;

    let paginator = CursorPaginator::new(params);
    let query = paginator.paginate(query)?;
    let specialties = query.fetch_all(state.db.pool()).await?;

    let page = paginator.create_result(specialties, total_count)?;
    Ok(Json(page))
}

async fn get_specialty(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SpecialtyRecord>, ApiError> {
    let specialty = state
        .db
        .specialties()
        .get(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(specialty))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/specialties", get(list_specialties))
        .route("/specialties/{id}", get(get_specialty))
}
