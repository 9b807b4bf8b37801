//! Person endpoints

use axum::{
    extract::{OriginalUri, Path, Query, Request, State},
    http::StatusCode,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::CurrentCaller;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, PaginatedResponse};
use crate::api::views::{PersonShape, PersonView};
use crate::domain::access::{Caller, Operation};
use crate::domain::person::PersonId;
use crate::domain::roster::{PersonQuery, UpdateMode};
use crate::domain::team::TeamId;
use crate::infrastructure::person::{CreatePersonRequest, PersonRecord, UpdatePersonRequest};

/// Query parameters for listing people
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonListParams {
    pub last_name: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Body of person create and update requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonBody {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of the assign-to-team request. An absent or null team clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignTeamBody {
    #[serde(default)]
    pub team: Option<u64>,
}

/// Person routes, each served with and without a trailing slash
pub fn routes() -> Router<AppState> {
    let collection = || get(list_people).post(create_person);
    let item = || {
        get(get_person)
            .put(replace_person)
            .patch(update_person)
            .delete(delete_person)
    };

    Router::new()
        .route("/people", collection())
        .route("/people/", collection())
        .route("/people/{id}", item())
        .route("/people/{id}/", item())
        .route("/people/{id}/assign-to-team", put(assign_to_team))
        .route("/people/{id}/assign-to-team/", put(assign_to_team))
}

fn parse_id(raw: &str) -> Result<PersonId, ApiError> {
    raw.parse::<u64>()
        .map(PersonId::new)
        .map_err(|_| ApiError::not_found("No Person matches the given query."))
}

fn summary(operation: Operation, record: &PersonRecord) -> Result<Json<PersonView>, ApiError> {
    Ok(Json(PersonView::render(
        PersonShape::resolve(operation)?,
        record,
    )))
}

/// GET /people/
pub async fn list_people(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<PersonListParams>,
) -> Result<Json<PaginatedResponse<PersonView>>, ApiError> {
    debug!(last_name = ?params.last_name, page = ?params.page, "Listing people");

    let page_request = state
        .pagination
        .resolve(params.page.as_deref(), params.page_size.as_deref())?;
    let query = PersonQuery::new().with_last_name(params.last_name.unwrap_or_default());

    let page = state
        .person_service
        .list(&caller, &query, &page_request)
        .await?;

    let shape = PersonShape::resolve(Operation::List)?;
    Ok(Json(PaginatedResponse::from_page(page, &uri, |record| {
        PersonView::render(shape, &record)
    })))
}

/// GET /people/{id}/
pub async fn get_person(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<String>,
) -> Result<Json<PersonView>, ApiError> {
    debug!(person_id = %id, "Getting person");

    let record = state.person_service.get(&caller, parse_id(&id)?).await?;
    summary(Operation::Retrieve, &record)
}

/// POST /people/
pub async fn create_person(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    request: Request,
) -> Result<(StatusCode, Json<PersonView>), ApiError> {
    state.authorize(Operation::Create, &caller)?;
    let body: PersonBody = Json::decode(request).await?;

    let request = CreatePersonRequest {
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
    };

    let person = state.person_service.create(&caller, request).await?;

    Ok((
        StatusCode::CREATED,
        summary(Operation::Create, &PersonRecord::new(person, None))?,
    ))
}

/// PUT /people/{id}/
pub async fn replace_person(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<PersonView>, ApiError> {
    update(&state, caller, &id, request, UpdateMode::Full).await
}

/// PATCH /people/{id}/
pub async fn update_person(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<PersonView>, ApiError> {
    update(&state, caller, &id, request, UpdateMode::Partial).await
}

async fn update(
    state: &AppState,
    caller: Caller,
    id: &str,
    request: Request,
    mode: UpdateMode,
) -> Result<Json<PersonView>, ApiError> {
    state.authorize(Operation::Update, &caller)?;
    let body: PersonBody = Json::decode(request).await?;

    let request = UpdatePersonRequest {
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
    };

    let person = state
        .person_service
        .update(&caller, parse_id(id)?, request, mode)
        .await?;

    summary(Operation::Update, &PersonRecord::new(person, None))
}

/// PUT /people/{id}/assign-to-team/
pub async fn assign_to_team(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<PersonView>, ApiError> {
    state.authorize(Operation::AssignToTeam, &caller)?;
    let body: AssignTeamBody = Json::decode(request).await?;

    let person = state
        .person_service
        .assign_team(&caller, parse_id(&id)?, body.team.map(TeamId::new))
        .await?;

    summary(Operation::AssignToTeam, &PersonRecord::new(person, None))
}

/// DELETE /people/{id}/
pub async fn delete_person(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.person_service.delete(&caller, parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
