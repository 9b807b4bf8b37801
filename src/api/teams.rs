//! Team endpoints

use axum::{
    extract::{OriginalUri, Path, Query, Request, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::CurrentCaller;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, PaginatedResponse};
use crate::api::views::{TeamShape, TeamView};
use crate::domain::access::{Caller, Operation};
use crate::domain::roster::{TeamQuery, UpdateMode};
use crate::domain::team::TeamId;
use crate::infrastructure::team::{CreateTeamRequest, UpdateTeamRequest};

/// Query parameters for listing teams
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamListParams {
    pub name: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Body of team create and update requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamBody {
    #[serde(default)]
    pub name: Option<String>,
}

/// Team routes, each served with and without a trailing slash
pub fn routes() -> Router<AppState> {
    let collection = || get(list_teams).post(create_team);
    let item = || {
        get(get_team)
            .put(replace_team)
            .patch(update_team)
            .delete(delete_team)
    };

    Router::new()
        .route("/teams", collection())
        .route("/teams/", collection())
        .route("/teams/{id}", item())
        .route("/teams/{id}/", item())
}

fn parse_id(raw: &str) -> Result<TeamId, ApiError> {
    raw.parse::<u64>()
        .map(TeamId::new)
        .map_err(|_| ApiError::not_found("No Team matches the given query."))
}

/// GET /teams/
pub async fn list_teams(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<TeamListParams>,
) -> Result<Json<PaginatedResponse<TeamView>>, ApiError> {
    debug!(name = ?params.name, page = ?params.page, "Listing teams");

    let page_request = state
        .pagination
        .resolve(params.page.as_deref(), params.page_size.as_deref())?;
    let query = TeamQuery::new().with_name(params.name.unwrap_or_default());

    let page = state
        .team_service
        .list(&caller, &query, &page_request)
        .await?;

    let shape = TeamShape::resolve(Operation::List)?;
    Ok(Json(PaginatedResponse::from_page(page, &uri, |record| {
        TeamView::render(shape, &record)
    })))
}

/// GET /teams/{id}/
pub async fn get_team(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<String>,
) -> Result<Json<TeamView>, ApiError> {
    debug!(team_id = %id, "Getting team");

    let record = state.team_service.get(&caller, parse_id(&id)?).await?;

    Ok(Json(TeamView::render(
        TeamShape::resolve(Operation::Retrieve)?,
        &record,
    )))
}

/// POST /teams/
pub async fn create_team(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    request: Request,
) -> Result<(StatusCode, Json<TeamView>), ApiError> {
    state.authorize(Operation::Create, &caller)?;
    let body: TeamBody = Json::decode(request).await?;

    let record = state
        .team_service
        .create(&caller, CreateTeamRequest { name: body.name })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TeamView::render(TeamShape::resolve(Operation::Create)?, &record)),
    ))
}

/// PUT /teams/{id}/
pub async fn replace_team(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<TeamView>, ApiError> {
    update(&state, caller, &id, request, UpdateMode::Full).await
}

/// PATCH /teams/{id}/
pub async fn update_team(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<TeamView>, ApiError> {
    update(&state, caller, &id, request, UpdateMode::Partial).await
}

async fn update(
    state: &AppState,
    caller: Caller,
    id: &str,
    request: Request,
    mode: UpdateMode,
) -> Result<Json<TeamView>, ApiError> {
    state.authorize(Operation::Update, &caller)?;
    let body: TeamBody = Json::decode(request).await?;

    let record = state
        .team_service
        .update(
            &caller,
            parse_id(id)?,
            UpdateTeamRequest { name: body.name },
            mode,
        )
        .await?;

    Ok(Json(TeamView::render(
        TeamShape::resolve(Operation::Update)?,
        &record,
    )))
}

/// DELETE /teams/{id}/
pub async fn delete_team(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.team_service.delete(&caller, parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
