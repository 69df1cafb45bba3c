//! REST handlers over the bracket logic. The store is injected as `Data<dyn EntityStore>`.

use crate::logic::{
    add_player, complete_match, create_tournament, delete_tournament, generate_bracket,
    get_match, get_matches_by_round, get_matches_by_tournament, get_tournament,
    import_players_csv, list_players, remove_player, rename_player, start_match,
    tournament_champion, update_match_score, update_tournament_status, CompleteMatch,
    ScoreFields,
};
use crate::models::{
    BeltColor, ErrorKind, MatchId, PlayerId, TournamentError, TournamentId, TournamentStatus,
    TournamentType,
};
use crate::store::EntityStore;
use actix_web::{
    delete, get,
    http::StatusCode,
    patch, post,
    web::{self, Data, Json, Path},
    HttpResponse, Responder, ResponseError,
};
use serde::Deserialize;
use thiserror::Error;

/// Shared store handed to every handler.
pub type AppState = Data<dyn EntityStore>;

/// TournamentError rendered as `{"error": "..."}` with a status code per error kind.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] TournamentError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.0.to_string() }))
    }
}

type ApiResult = Result<HttpResponse, ApiError>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(rename = "type", default)]
    kind: TournamentType,
    size: u32,
    #[serde(default)]
    total_rounds: Option<u32>,
}

#[derive(Deserialize)]
struct UpdateStatusBody {
    status: TournamentStatus,
    #[serde(default)]
    current_round: Option<u32>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default)]
    belt_color: Option<BeltColor>,
}

#[derive(Deserialize)]
struct RenamePlayerBody {
    name: String,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and round (e.g. /api/tournaments/{id}/matches/round/{round})
#[derive(Deserialize)]
struct RoundPath {
    id: TournamentId,
    round: u32,
}

#[derive(Deserialize)]
struct PlayerPath {
    id: PlayerId,
}

#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

fn deleted() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "success": true }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "karate-bracket-web",
    })
}

/// Create a tournament in Setup.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> ApiResult {
    let t = create_tournament(
        state.get_ref(),
        &body.name,
        body.kind,
        body.size,
        body.total_rounds,
    )?;
    Ok(HttpResponse::Ok().json(t))
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> ApiResult {
    Ok(HttpResponse::Ok().json(get_tournament(state.get_ref(), path.id)?))
}

/// Delete a tournament with its players and matches.
#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> ApiResult {
    delete_tournament(state.get_ref(), path.id)?;
    Ok(deleted())
}

/// Explicit status / current round change (e.g. marking the tournament completed).
#[patch("/api/tournaments/{id}/status")]
async fn api_update_status(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<UpdateStatusBody>,
) -> ApiResult {
    let t = update_tournament_status(state.get_ref(), path.id, body.status, body.current_round)?;
    Ok(HttpResponse::Ok().json(t))
}

/// Winner of the final, or null while it is still being played.
#[get("/api/tournaments/{id}/champion")]
async fn api_champion(state: AppState, path: Path<TournamentPath>) -> ApiResult {
    Ok(HttpResponse::Ok().json(tournament_champion(state.get_ref(), path.id)?))
}

#[post("/api/tournaments/{id}/players")]
async fn api_add_player(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddPlayerBody>,
) -> ApiResult {
    let player = add_player(state.get_ref(), path.id, &body.name, body.belt_color)?;
    Ok(HttpResponse::Ok().json(player))
}

#[get("/api/tournaments/{id}/players")]
async fn api_list_players(state: AppState, path: Path<TournamentPath>) -> ApiResult {
    Ok(HttpResponse::Ok().json(list_players(state.get_ref(), path.id)?))
}

/// Bulk add from a CSV body (`name[,belt_color]` with a header row).
#[post("/api/tournaments/{id}/players/import")]
async fn api_import_players(state: AppState, path: Path<TournamentPath>, body: String) -> ApiResult {
    let players = import_players_csv(state.get_ref(), path.id, body.as_bytes())?;
    Ok(HttpResponse::Ok().json(players))
}

#[patch("/api/players/{id}")]
async fn api_rename_player(
    state: AppState,
    path: Path<PlayerPath>,
    body: Json<RenamePlayerBody>,
) -> ApiResult {
    Ok(HttpResponse::Ok().json(rename_player(state.get_ref(), path.id, &body.name)?))
}

#[delete("/api/players/{id}")]
async fn api_remove_player(state: AppState, path: Path<PlayerPath>) -> ApiResult {
    remove_player(state.get_ref(), path.id)?;
    Ok(deleted())
}

/// Build every match of the bracket (needs exactly `size` players).
#[post("/api/tournaments/{id}/generate-bracket")]
async fn api_generate_bracket(state: AppState, path: Path<TournamentPath>) -> ApiResult {
    Ok(HttpResponse::Ok().json(generate_bracket(state.get_ref(), path.id)?))
}

#[get("/api/tournaments/{id}/matches")]
async fn api_list_matches(state: AppState, path: Path<TournamentPath>) -> ApiResult {
    Ok(HttpResponse::Ok().json(get_matches_by_tournament(state.get_ref(), path.id)?))
}

#[get("/api/tournaments/{id}/matches/round/{round}")]
async fn api_round_matches(state: AppState, path: Path<RoundPath>) -> ApiResult {
    Ok(HttpResponse::Ok().json(get_matches_by_round(state.get_ref(), path.id, path.round)?))
}

#[get("/api/matches/{id}")]
async fn api_get_match(state: AppState, path: Path<MatchPath>) -> ApiResult {
    Ok(HttpResponse::Ok().json(get_match(state.get_ref(), path.id)?))
}

/// Start the match timer (pending -> in_progress).
#[post("/api/matches/{id}/start")]
async fn api_start_match(state: AppState, path: Path<MatchPath>) -> ApiResult {
    Ok(HttpResponse::Ok().json(start_match(state.get_ref(), path.id)?))
}

#[patch("/api/matches/{id}/score")]
async fn api_update_score(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<ScoreFields>,
) -> ApiResult {
    Ok(HttpResponse::Ok().json(update_match_score(state.get_ref(), path.id, &body)?))
}

/// Complete the match and advance the winner.
#[patch("/api/matches/{id}/complete")]
async fn api_complete_match(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<CompleteMatch>,
) -> ApiResult {
    Ok(HttpResponse::Ok().json(complete_match(state.get_ref(), path.id, &body)?))
}

/// Register every route on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_create_tournament)
        .service(api_get_tournament)
        .service(api_delete_tournament)
        .service(api_update_status)
        .service(api_champion)
        .service(api_import_players)
        .service(api_add_player)
        .service(api_list_players)
        .service(api_rename_player)
        .service(api_remove_player)
        .service(api_generate_bracket)
        .service(api_list_matches)
        .service(api_round_matches)
        .service(api_get_match)
        .service(api_start_match)
        .service(api_update_score)
        .service(api_complete_match);
}
