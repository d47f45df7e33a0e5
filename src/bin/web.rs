//! Single binary web server: bracket state in memory, API via REST.
//! Run with: cargo run --bin web
//! Binds 0.0.0.0:8080 unless HOST / PORT say otherwise.

use actix_web::{
    delete, get, post, put,
    web::{Bytes, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use bracket_tournament_web::{
    apply, build, get_champion, get_third_place_match, shuffle_teams, teams_from_csv,
    teams_from_names, BracketError, Decision, MatchId, Team, TournamentState,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Id handed back on creation; clients send it with every later request.
type TournamentId = Uuid;

/// Per-tournament entry: current bracket state + last activity time (for auto-cleanup).
struct TournamentEntry {
    state: TournamentState,
    last_activity: Instant,
}

/// Live brackets keyed by id. Nothing is persisted; idle brackets are evicted by the cleanup task.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Tournament id plus the full bracket state.
#[derive(Serialize)]
struct TournamentResponse<'a> {
    id: TournamentId,
    #[serde(flatten)]
    state: &'a TournamentState,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    teams: Vec<String>,
    #[serde(default)]
    shuffle: bool,
}

#[derive(Deserialize)]
struct ImportQuery {
    #[serde(default)]
    shuffle: bool,
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

fn error_response(e: &BracketError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        BracketError::MatchNotFound(_) => HttpResponse::NotFound().json(body),
        BracketError::RevertBlocked(_) => HttpResponse::Conflict().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn no_tournament() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Build the bracket and register it under a fresh id.
fn start_tournament(state: &AppState, mut teams: Vec<Team>, shuffle: bool) -> HttpResponse {
    if shuffle {
        shuffle_teams(&mut teams, &mut rand::thread_rng());
    }
    let bracket = match build(teams) {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };
    let id = Uuid::new_v4();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(TournamentResponse { id, state: &bracket });
    g.insert(
        id,
        TournamentEntry {
            state: bracket,
            last_activity: Instant::now(),
        },
    );
    log::info!("Started tournament {}", id);
    response
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-tournament-web",
    })
}

/// Create a tournament from a list of team names (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let teams = teams_from_names(&body.teams);
    start_tournament(&state, teams, body.shuffle)
}

/// Create a tournament from a CSV upload (one team name per row).
#[post("/api/tournaments/import")]
async fn api_import_tournament(state: AppState, query: Query<ImportQuery>, body: Bytes) -> HttpResponse {
    match teams_from_csv(body.as_ref()) {
        Ok(teams) => start_tournament(&state, teams, query.shuffle),
        Err(e) => error_response(&e),
    }
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(TournamentResponse {
                id: path.id,
                state: &entry.state,
            })
        }
        None => no_tournament(),
    }
}

/// Reset: discard the tournament entirely.
#[delete("/api/tournaments/{id}")]
async fn api_reset_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove(&path.id) {
        Some(_) => {
            log::info!("Reset tournament {}", path.id);
            HttpResponse::NoContent().finish()
        }
        None => no_tournament(),
    }
}

/// Decide or revert one match. The stored state is only replaced when the engine accepts the action.
#[put("/api/tournaments/{id}/matches/{match_id}")]
async fn api_apply_decision(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<Decision>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    match apply(&entry.state, &path.match_id, &body) {
        Ok(next) => {
            entry.state = next;
            HttpResponse::Ok().json(TournamentResponse {
                id: path.id,
                state: &entry.state,
            })
        }
        Err(e) => {
            log::warn!("Rejected {:?} on {}: {}", body.0, path.match_id, e);
            error_response(&e)
        }
    }
}

/// Champion (null until the final is decided).
#[get("/api/tournaments/{id}/champion")]
async fn api_get_champion(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(entry) => HttpResponse::Ok().json(serde_json::json!({
            "is_complete": entry.state.is_complete,
            "champion": get_champion(&entry.state),
        })),
        None => no_tournament(),
    }
}

/// Third-place match (null until a semifinal is decided).
#[get("/api/tournaments/{id}/third-place")]
async fn api_get_third_place(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(entry) => HttpResponse::Ok().json(get_third_place_match(&entry.state)),
        None => no_tournament(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Bracket service listening on {}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Evict brackets nobody has read or played for INACTIVITY_TIMEOUT; checked every 30 minutes.
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Evicted {} idle bracket(s), {} still active", removed, g.len());
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_import_tournament)
            .service(api_get_tournament)
            .service(api_reset_tournament)
            .service(api_apply_decision)
            .service(api_get_champion)
            .service(api_get_third_place)
    })
    .bind(bind)?
    .run()
    .await
}
