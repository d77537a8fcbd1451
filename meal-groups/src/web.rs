use std::collections::VecDeque;
use std::sync::Mutex;

use actix_files::Files;
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{web_attempts, WebConfig};
use crate::display::render_report;
use crate::draw::{run_draw, Draw};
use crate::error::{DrawError, DrawResult};
use crate::export::{to_csv_string, DrawSummary};
use crate::seed::{resolve_seed, ResolvedSeed};

const SESSION_DRAW_KEY: &str = "draw_id";

/// Inputs of a past draw; enough to reproduce it exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDraw {
    pub text: String,
    pub seed: ResolvedSeed,
    pub max_attempts: usize,
}

impl StoredDraw {
    pub fn replay(&self) -> DrawResult<Draw> {
        run_draw(&self.text, self.seed, self.max_attempts)
    }
}

/// The newest draws, oldest evicted first
#[derive(Debug)]
pub struct DrawArchive {
    next_id: u64,
    capacity: usize,
    entries: VecDeque<(u64, StoredDraw)>,
}

impl DrawArchive {
    pub fn new(capacity: usize) -> Self {
        DrawArchive {
            next_id: 1,
            capacity: capacity.max(1),
            entries: VecDeque::new(),
        }
    }

    pub fn insert(&mut self, draw: StoredDraw) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((id, draw));
        id
    }

    pub fn get(&self, id: u64) -> Option<&StoredDraw> {
        self.entries.iter().find(|(i, _)| *i == id).map(|(_, d)| d)
    }
}

pub struct AppState {
    pub archive: Mutex<DrawArchive>,
}

impl AppState {
    pub fn new(archive_capacity: usize) -> Self {
        AppState {
            archive: Mutex::new(DrawArchive::new(archive_capacity)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DrawRequest {
    pub text: String,
    pub seed: Option<String>,
    pub max_attempts: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DrawResponse {
    pub success: bool,
    pub summary: DrawSummary,
    pub report: String,
}

fn bad_request(error: impl ToString) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "success": false,
        "error": error.to_string(),
    }))
}

fn no_draw() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "success": false,
        "error": "No draw available",
    }))
}

// Draw endpoint
async fn create_draw(
    req: web::Json<DrawRequest>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    if req.text.trim().is_empty() {
        return Ok(bad_request("Please paste the message with the participants"));
    }

    let max_attempts = match web_attempts(req.max_attempts) {
        Ok(n) => n,
        Err(e) => return Ok(bad_request(e)),
    };
    let stored = StoredDraw {
        text: req.text,
        seed: resolve_seed(req.seed.as_deref()),
        max_attempts,
    };

    let draw = match stored.replay() {
        Ok(draw) => draw,
        Err(e @ (DrawError::NoPeople
        | DrawError::NoEligibleSlots(_)
        | DrawError::Infeasible { .. }
        | DrawError::InvalidConfig(_))) => {
            warn!(error = %e, "draw rejected");
            return Ok(bad_request(e));
        }
        Err(e) => return Err(actix_web::error::ErrorInternalServerError(e)),
    };

    let id = state
        .archive
        .lock()
        .map_err(|_| actix_web::error::ErrorInternalServerError("draw archive unavailable"))?
        .insert(stored);
    session.insert(SESSION_DRAW_KEY, id)?;
    info!(draw_id = id, seed = draw.seed.value, people = draw.people.len(), "draw stored");

    Ok(HttpResponse::Ok().json(DrawResponse {
        success: true,
        summary: DrawSummary::from(&draw),
        report: render_report(&draw, Utc::now()),
    }))
}

/// Re-runs the session's last draw from its recorded inputs.
fn last_draw(session: &Session, state: &AppState) -> Result<Option<Draw>> {
    let Some(id) = session.get::<u64>(SESSION_DRAW_KEY)? else {
        return Ok(None);
    };
    let stored = state
        .archive
        .lock()
        .map_err(|_| actix_web::error::ErrorInternalServerError("draw archive unavailable"))?
        .get(id)
        .cloned();
    match stored {
        Some(stored) => stored
            .replay()
            .map(Some)
            .map_err(actix_web::error::ErrorInternalServerError),
        None => Ok(None),
    }
}

async fn export_csv(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    let Some(draw) = last_draw(&session, &state)? else {
        return Ok(no_draw());
    };
    let csv = to_csv_string(&draw).map_err(actix_web::error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"meal-groups-{}.csv\"", draw.seed.value),
        ))
        .body(csv))
}

async fn export_text(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    let Some(draw) = last_draw(&session, &state)? else {
        return Ok(no_draw());
    };
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(render_report(&draw, Utc::now())))
}

// HTML page handler
async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Registers the page and API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/draw", web::post().to(create_draw))
        .route("/api/draw/last.csv", web::get().to(export_csv))
        .route("/api/draw/last.txt", web::get().to(export_text));
}

pub async fn start_server(config: WebConfig) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(config.archive_capacity));
    // Sessions only need to survive while this process runs.
    let session_key = Key::generate();

    info!(bind = %config.bind, port = config.port, "starting web server");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                session_key.clone(),
            ))
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .configure(configure)
    })
    .bind((config.bind.as_str(), config.port))?
    .run()
    .await
}
