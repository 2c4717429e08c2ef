use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json,
};
use http::StatusCode;
use roster_dal::player::{CreatePlayer, UpdatePlayer};
#[cfg_attr(not(feature = "openapi"), allow(unused_imports))]
use roster_dal::player::Player;
use tracing::debug;

use super::{parse_id, PagingQuery, PlayerFilterQuery};
use crate::{
    error::{ApiError, ApiResult},
    service::PlayerService,
    state::AppState,
    validate::Garde,
};

#[cfg(feature = "openapi")]
#[derive(utoipa::OpenApi)]
#[openapi(paths(list, count, create, get_one, update, delete))]
struct ModuleDocs;

#[cfg(feature = "openapi")]
pub fn api_docs() -> utoipa::openapi::OpenApi {
    use utoipa::OpenApi as _;
    ModuleDocs::openapi()
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(p)| p)
        .map_err(|e| ApiError::InvalidInput(e.body_text()))
}

#[cfg_attr(feature = "openapi",  utoipa::path(get, path = "", tag = "Player", operation_id = "listPlayers",
    params(PlayerFilterQuery, PagingQuery), responses((status = StatusCode::OK, description = "One page of matching players", body = Vec<Player>))))]
pub async fn list(
    service: PlayerService,
    State(state): State<AppState>,
    Garde(Query(query)): Garde<Query<PlayerFilterQuery>>,
    Garde(Query(paging)): Garde<Query<PagingQuery>>,
) -> ApiResult<impl IntoResponse> {
    let params = paging.listing_params(state.config().default_page_size);
    let players = service.list(&query.filter(), params).await?;
    Ok((StatusCode::OK, Json(players)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(get, path = "/count", tag = "Player", operation_id = "countPlayers",
    params(PlayerFilterQuery), responses((status = StatusCode::OK, description = "Number of all matching players", body = u64))))]
pub async fn count(
    service: PlayerService,
    Garde(Query(query)): Garde<Query<PlayerFilterQuery>>,
) -> ApiResult<impl IntoResponse> {
    let count = service.count(&query.filter()).await?;
    Ok((StatusCode::OK, Json(count)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(post, path = "", tag = "Player", operation_id = "createPlayer",
    request_body = CreatePlayer,
    responses((status = StatusCode::OK, description = "Created player", body = Player),
        (status = StatusCode::BAD_REQUEST, description = "Missing or invalid field"))))]
pub async fn create(
    service: PlayerService,
    payload: Result<Json<CreatePlayer>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let record = service.create(body(payload)?).await?;
    Ok((StatusCode::OK, Json(record)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(get, path = "/{id}", tag = "Player", operation_id = "getPlayer",
    params(("id" = String, Path, description = "Positive player id")),
    responses((status = StatusCode::OK, description = "Get one", body = Player),
        (status = StatusCode::BAD_REQUEST, description = "Invalid id"),
        (status = StatusCode::NOT_FOUND, description = "No such player"))))]
pub async fn get_one(
    Path(id): Path<String>,
    service: PlayerService,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let record = service.get(id).await?;
    Ok((StatusCode::OK, Json(record)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(post, path = "/{id}", tag = "Player", operation_id = "updatePlayer",
    params(("id" = String, Path, description = "Positive player id")),
    request_body = UpdatePlayer,
    responses((status = StatusCode::OK, description = "Updated player", body = Player),
        (status = StatusCode::BAD_REQUEST, description = "Invalid id or field"),
        (status = StatusCode::NOT_FOUND, description = "No such player"))))]
pub async fn update(
    Path(id): Path<String>,
    service: PlayerService,
    payload: Result<Json<UpdatePlayer>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    if id == i64::MAX {
        return Err(ApiError::InvalidPath(format!("Player id {id} out of range")));
    }
    let record = service.update(id, body(payload)?).await?;
    Ok((StatusCode::OK, Json(record)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(delete, path = "/{id}", tag = "Player", operation_id = "deletePlayer",
    params(("id" = String, Path, description = "Positive player id")),
    responses((status = StatusCode::OK, description = "Deleted"),
        (status = StatusCode::BAD_REQUEST, description = "Invalid id"),
        (status = StatusCode::NOT_FOUND, description = "No such player"))))]
pub async fn delete(
    Path(id): Path<String>,
    service: PlayerService,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    service.delete(id).await?;
    debug!("Deleted player {id}");
    Ok((StatusCode::OK, ()))
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", get(list).post(create))
        .route("/count", get(count))
        .route("/{id}", get(get_one).post(update).delete(delete))
}
