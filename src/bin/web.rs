//! Single binary web server: REST API over the tournament store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Tournaments are kept in DATA_FILE (default tournaments.json).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use round_robin_web::{
    edit_tournament, record_match_score, regenerate_schedule, Match, MatchId, StoreError, Tournament,
    TournamentEdit, TournamentError, TournamentId, TournamentStore,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Shared store. All mutations go through the write lock, so regenerations never overlap.
type AppState = Data<RwLock<TournamentStore>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct ScoreBody {
    team_1_score: u32,
    team_2_score: u32,
}

#[derive(Serialize)]
struct RoundView<'a> {
    round: u32,
    matches: Vec<&'a Match>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id})
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_body(e: impl ToString) -> serde_json::Value {
    serde_json::json!({ "error": e.to_string() })
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(error_body("lock error"))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(error_body("No tournament"))
}

fn store_error_response(e: StoreError) -> HttpResponse {
    match e {
        StoreError::InvalidTournament(_) => {
            log::warn!("Rejected tournament: {}", e);
            HttpResponse::BadRequest().json(error_body(e))
        }
        StoreError::TournamentNotFound(_) => HttpResponse::NotFound().json(error_body(e)),
        StoreError::Load(_)
        | StoreError::Parse(_)
        | StoreError::Encode(_)
        | StoreError::Save(_) => {
            log::error!("{}", e);
            HttpResponse::InternalServerError().json(error_body(e))
        }
    }
}

/// Apply `op` to a copy of the tournament and store the result. Nothing changes if `op` fails.
fn mutate_tournament<F>(state: &AppState, id: TournamentId, op: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let mut t = match g.get(id) {
        Some(t) => t.clone(),
        None => return not_found(),
    };
    if let Err(e) = op(&mut t) {
        log::warn!("Rejected change to tournament {}: {}", id, e);
        return HttpResponse::BadRequest().json(error_body(e));
    }
    match g.update(t.clone()) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => store_error_response(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "round-robin-web",
    })
}

/// List all tournaments.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(g.tournaments()),
        Err(_) => lock_error(),
    }
}

/// Create a tournament from title, team names and courts; its schedule is generated immediately.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<TournamentEdit>) -> HttpResponse {
    let mut tournament = Tournament::new(body.title.trim());
    if let Err(e) = edit_tournament(&mut tournament, body.into_inner()) {
        log::warn!("Rejected new tournament: {}", e);
        return HttpResponse::BadRequest().json(error_body(e));
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.add(tournament.clone()) {
        Ok(()) => {
            log::info!("Created tournament {} ({} matches)", tournament.id, tournament.schedule.len());
            HttpResponse::Ok().json(tournament)
        }
        Err(e) => store_error_response(e),
    }
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get(path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => not_found(),
    }
}

/// Replace title, teams and courts. Regenerates the schedule (recorded scores are dropped).
#[put("/api/tournaments/{id}")]
async fn api_edit_tournament(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TournamentEdit>,
) -> HttpResponse {
    let edit = body.into_inner();
    mutate_tournament(&state, path.id, |t| edit_tournament(t, edit))
}

/// Delete a tournament.
#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.remove(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => store_error_response(e),
    }
}

/// Regenerate the schedule from scratch.
#[post("/api/tournaments/{id}/schedule")]
async fn api_regenerate_schedule(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate_tournament(&state, path.id, |t| {
        regenerate_schedule(t);
        Ok(())
    })
}

/// Schedule grouped by round.
#[get("/api/tournaments/{id}/rounds")]
async fn api_get_rounds(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let Some(t) = g.get(path.id) else {
        return not_found();
    };
    let rounds: Vec<RoundView> = t
        .rounds()
        .into_iter()
        .map(|(round, matches)| RoundView { round, matches })
        .collect();
    HttpResponse::Ok().json(rounds)
}

/// Record the score of one match.
#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_record_score(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let match_id = path.match_id;
    mutate_tournament(&state, path.id, |t| {
        record_match_score(t, match_id, body.team_1_score, body.team_2_score)
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_file() -> String {
    "tournaments.json".to_string()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_file = std::env::var("DATA_FILE").unwrap_or_else(|_| default_data_file());

    let store = TournamentStore::open(&data_file)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    log::info!(
        "Loaded {} tournament(s) from {}",
        store.tournaments().len(),
        store.path().display()
    );
    let state = Data::new(RwLock::new(store));

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_list_tournaments)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_edit_tournament)
            .service(api_delete_tournament)
            .service(api_regenerate_schedule)
            .service(api_get_rounds)
            .service(api_record_score)
    })
    .bind(bind)?
    .run()
    .await
}
