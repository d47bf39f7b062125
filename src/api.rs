//! REST API: roster, tournaments, brackets and match results.
//!
//! All state lives in one [`MemoryStore`] behind an async `RwLock`; a write guard is held
//! for the whole of each mutating request, so concurrent submissions are applied one at a time.

use crate::config::ServerConfig;
use crate::logic::MatchUpdate;
use crate::models::{ErrorClass, PlayerId, TournamentError};
use crate::service;
use crate::store::MemoryStore;
use actix_web::{
    delete,
    error::{InternalError, JsonPayloadError, PathError},
    get, patch, post,
    web::{self, Data, Json, Path},
    HttpRequest, HttpResponse, Responder,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Shared record store.
pub type AppState = Data<RwLock<MemoryStore>>;
/// Server configuration (bracket size limit).
pub type AppConfig = Data<ServerConfig>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreatePlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct CreateTeamBody {
    name: String,
    player1_id: PlayerId,
    player2_id: PlayerId,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    team_count: u32,
}

/// Path segment: record id (e.g. /api/players/{id})
#[derive(Deserialize)]
struct IdPath {
    id: u64,
}

/// Map an engine error to its HTTP status, with `{kind, error}` as body.
pub fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "kind": e.kind(), "error": e.to_string() });
    match e.class() {
        ErrorClass::Validation => HttpResponse::BadRequest().json(body),
        ErrorClass::NotFound => HttpResponse::NotFound().json(body),
        ErrorClass::Integrity => {
            log::error!("{}", e);
            HttpResponse::Conflict().json(body)
        }
    }
}

fn respond<T: Serialize>(result: Result<T, TournamentError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(&e),
    }
}

fn respond_created<T: Serialize>(result: Result<T, TournamentError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Created().json(value),
        Err(e) => error_response(&e),
    }
}

fn malformed_response(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "kind": "malformed_payload", "error": message }))
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = malformed_response(err.to_string());
    InternalError::from_response(err, response).into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let response = malformed_response(err.to_string());
    InternalError::from_response(err, response).into()
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "duo-bracket-web",
    })
}

/// List all players, deleted ones included.
#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    let g = state.read().await;
    HttpResponse::Ok().json(g.players())
}

/// Players not deleted and not in an active team.
#[get("/api/players/available")]
async fn api_list_available_players(state: AppState) -> HttpResponse {
    let g = state.read().await;
    HttpResponse::Ok().json(service::list_available_players(&g))
}

#[post("/api/players")]
async fn api_create_player(state: AppState, body: Json<CreatePlayerBody>) -> HttpResponse {
    let mut g = state.write().await;
    respond_created(service::create_player(&mut g, &body.name))
}

/// Soft delete: the player stays listed with `deleted: true`.
#[delete("/api/players/{id}")]
async fn api_delete_player(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = state.write().await;
    respond(service::soft_delete_player(&mut g, path.id))
}

#[get("/api/teams")]
async fn api_list_teams(state: AppState) -> HttpResponse {
    let g = state.read().await;
    HttpResponse::Ok().json(service::list_teams(&g))
}

#[post("/api/teams")]
async fn api_create_team(state: AppState, body: Json<CreateTeamBody>) -> HttpResponse {
    let mut g = state.write().await;
    respond_created(service::create_team(&mut g, &body.name, body.player1_id, body.player2_id))
}

#[delete("/api/teams/{id}")]
async fn api_delete_team(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = state.write().await;
    respond(service::soft_delete_team(&mut g, path.id))
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let g = state.read().await;
    HttpResponse::Ok().json(g.tournaments())
}

/// Create a tournament in draft together with its full bracket.
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    config: AppConfig,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    let mut g = state.write().await;
    respond_created(service::create_tournament(
        &mut g,
        &body.name,
        body.team_count,
        config.max_team_count,
    ))
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = state.read().await;
    respond(service::get_tournament(&g, path.id))
}

/// Bracket of a tournament, ordered by round then match order.
#[get("/api/tournaments/{id}/matches")]
async fn api_list_matches(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = state.read().await;
    respond(service::list_matches(&g, path.id))
}

/// Record scores / teams for a match; `finalize: true` also tries to decide the winner.
#[patch("/api/matches/{id}")]
async fn api_update_match(state: AppState, path: Path<IdPath>, body: Json<MatchUpdate>) -> HttpResponse {
    let mut g = state.write().await;
    respond(service::submit_match_result(&mut g, path.id, &body))
}

/// Register every route plus the JSON/path rejection handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(api_health)
        .service(api_list_available_players)
        .service(api_list_players)
        .service(api_create_player)
        .service(api_delete_player)
        .service(api_list_teams)
        .service(api_create_team)
        .service(api_delete_team)
        .service(api_list_tournaments)
        .service(api_create_tournament)
        .service(api_get_tournament)
        .service(api_list_matches)
        .service(api_update_match);
}
