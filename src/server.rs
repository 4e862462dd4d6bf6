//! HTTP server: deals boards, checks words and records scores.
//!
//! Routes:
//! - `GET /` deals a new board into the caller's session.
//! - `GET /check-word?word=W` classifies a word against the session's board.
//! - `POST /post-score` records a finished round.
//! - `GET /health` liveness probe.
//!
//! The session ID travels in the [`SESSION_COOKIE`] cookie.

use crate::session::{SessionError, SessionId, SessionStore};
use axum::{
    Json, Router,
    body::Body,
    extract::{Query, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strictly_wordgrid::{Dictionary, Grid, GridError, Verdict, classify, generate};
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

/// Name of the cookie carrying the session ID.
pub const SESSION_COOKIE: &str = "boggle_session";

/// Shared state handed to every request.
#[derive(Debug, Clone, Getters)]
pub struct AppState {
    /// Player sessions.
    sessions: SessionStore,
    /// Word list, loaded once at startup.
    dictionary: Arc<Dictionary>,
    /// Side length of dealt boards.
    board_size: usize,
}

impl AppState {
    /// Creates server state around a loaded dictionary.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidSize`] if `board_size` is unsupported.
    #[instrument(skip(dictionary), fields(words = dictionary.len()))]
    pub fn new(dictionary: Dictionary, board_size: usize) -> Result<Self, GridError> {
        Grid::check_size(board_size)?;
        info!(board_size, "Creating server state");
        Ok(Self {
            sessions: SessionStore::new(),
            dictionary: Arc::new(dictionary),
            board_size,
        })
    }

    /// Replaces the session store, e.g. with one built from configured limits.
    pub fn with_sessions(mut self, sessions: SessionStore) -> Self {
        self.sessions = sessions;
        self
    }
}

/// Response for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBoardResponse {
    /// The freshly dealt board.
    pub board: Grid,
    /// Best score in this session.
    pub highscore: u32,
    /// Rounds played in this session.
    pub nplays: u32,
}

/// Query for `GET /check-word`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckWordQuery {
    /// The submitted word.
    pub word: String,
}

/// Response for `GET /check-word`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CheckWordResponse {
    /// Classification of the word.
    pub result: Verdict,
}

/// Body for `POST /post-score`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PostScoreRequest {
    /// Score of the finished round.
    pub score: u32,
}

/// Response for `POST /post-score`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PostScoreResponse {
    /// Whether the score beat the session's previous high score.
    #[serde(rename = "brokeRecord")]
    pub broke_record: bool,
}

/// Request failure, rendered as a JSON `{"error": ...}` body.
#[derive(Debug, Display, Error)]
pub enum ServerError {
    /// The request carried no session cookie.
    #[display("No session cookie; start a round first")]
    NoSession,
    /// Session lookup failed.
    #[display("{_0}")]
    Session(SessionError),
    /// Board generation failed.
    #[display("{_0}")]
    Grid(GridError),
    /// A response header could not be built.
    #[display("Invalid header value: {_0}")]
    Header(header::InvalidHeaderValue),
}

impl From<SessionError> for ServerError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

impl From<GridError> for ServerError {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

impl From<header::InvalidHeaderValue> for ServerError {
    fn from(err: header::InvalidHeaderValue) -> Self {
        Self::Header(err)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::NoSession | ServerError::Session(_) => StatusCode::BAD_REQUEST,
            ServerError::Grid(_) | ServerError::Header(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(%status, error = %self, "Request failed");
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(new_board))
        .route("/check-word", get(check_word))
        .route("/post-score", post(post_score))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .map_request(|req: Request<Body>| {
                    debug!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
                    req
                })
                .layer(middleware::from_fn(log_response)),
        )
        .with_state(state)
}

async fn log_response(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    info!(%method, %uri, status = %response.status(), "Response sent");
    response
}

/// Session ID from the request's cookies, if present.
fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}

/// Attaches a `Set-Cookie` header for a newly created session.
fn with_session_cookie(
    mut response: Response,
    id: &SessionId,
    created: bool,
) -> Result<Response, ServerError> {
    if created {
        let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id);
        response
            .headers_mut()
            .append(header::SET_COOKIE, HeaderValue::from_str(&cookie)?);
    }
    Ok(response)
}

/// Deals a new board into the session.
#[instrument(skip_all)]
async fn new_board(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let (id, created) = state.sessions.ensure(session_cookie(&headers));
    let board = generate(state.board_size)?;
    state.sessions.set_board(&id, board.clone())?;

    let session = state
        .sessions
        .get(&id)
        .ok_or_else(|| SessionError::UnknownSession { id: id.clone() })?;

    info!(session_id = %id, "New round started");
    let body = NewBoardResponse {
        board,
        highscore: *session.highscore(),
        nplays: *session.nplays(),
    };
    with_session_cookie(Json(body).into_response(), &id, created)
}

/// Classifies a submitted word against the session's board.
#[instrument(skip_all, fields(word = %query.word))]
async fn check_word(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CheckWordQuery>,
) -> Result<Json<CheckWordResponse>, ServerError> {
    let id = session_cookie(&headers).ok_or(ServerError::NoSession)?;
    let board = state.sessions.board(id)?;

    let word = query.word.trim().to_lowercase();
    let result = classify(&board, &word, state.dictionary.as_ref());

    debug!(session_id = id, %word, %result, "Word checked");
    Ok(Json(CheckWordResponse { result }))
}

/// Records a finished round's score.
#[instrument(skip_all, fields(score = req.score))]
async fn post_score(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PostScoreRequest>,
) -> Result<Response, ServerError> {
    let (id, created) = state.sessions.ensure(session_cookie(&headers));
    let outcome = state.sessions.record_score(&id, req.score)?;

    let body = PostScoreResponse {
        broke_record: *outcome.broke_record(),
    };
    with_session_cookie(Json(body).into_response(), &id, created)
}

async fn health() -> &'static str {
    "ok"
}
