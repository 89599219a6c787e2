use std::fmt;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use xenotic_engine::{
    AggregateStats, Difficulty, GameError, GameSnapshot, Move, NewGame, SessionId, Symbol,
    log_warn,
};

use crate::web_server::WebServerState;

#[derive(Debug, Default, Deserialize)]
pub struct NewGameRequest {
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub human_symbol: Option<String>,
}

/// Coordinates are signed so negative values reach the move check.
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub game_id: SessionId,
    pub row: i64,
    pub col: i64,
}

#[derive(Debug, Deserialize)]
pub struct GameIdRequest {
    pub game_id: SessionId,
}

#[derive(Debug, Deserialize)]
pub struct ChangeDifficultyRequest {
    pub game_id: SessionId,
    pub difficulty: String,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    kind: &'static str,
}

/// Everything a handler can answer with instead of a snapshot.
#[derive(Debug)]
pub enum ApiError {
    Game(GameError),
    /// Body or query string that did not decode into the request type.
    Malformed(String),
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        Self::Game(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Game(err) => write!(f, "{}", err),
            ApiError::Malformed(message) => write!(f, "malformed request: {}", message),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Game(GameError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Game(GameError::InvalidState(_)) => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Game(err) => err.kind(),
            ApiError::Malformed(_) => "malformed_request",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log_warn!("Request rejected: {}", self);
        let body = ErrorBody {
            success: false,
            error: self.to_string(),
            kind: self.kind(),
        };
        (self.status(), Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub async fn new_game(
    State(state): State<WebServerState>,
    payload: Result<Json<NewGameRequest>, JsonRejection>,
) -> ApiResult<NewGame> {
    let Json(request) = payload?;
    let difficulty = parse_or_default(request.difficulty.as_deref(), Difficulty::Impossible);
    let human_symbol = parse_or_default(request.human_symbol.as_deref(), Symbol::X);
    let game = state.service.create_session(difficulty, human_symbol).await;
    Ok(ApiResponse::ok(game))
}

pub async fn make_move(
    State(state): State<WebServerState>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> ApiResult<GameSnapshot> {
    let Json(request) = payload?;
    let mv = Move::from_coords(request.row, request.col)?;
    let snapshot = state.service.submit_human_move(&request.game_id, mv).await?;
    Ok(ApiResponse::ok(snapshot))
}

pub async fn ai_first_move(
    State(state): State<WebServerState>,
    payload: Result<Json<GameIdRequest>, JsonRejection>,
) -> ApiResult<GameSnapshot> {
    let Json(request) = payload?;
    let snapshot = state.service.request_ai_move(&request.game_id).await?;
    Ok(ApiResponse::ok(snapshot))
}

pub async fn game_state(
    State(state): State<WebServerState>,
    query: Result<Query<GameIdRequest>, QueryRejection>,
) -> ApiResult<GameSnapshot> {
    let Query(request) = query?;
    let snapshot = state.service.get_state(&request.game_id).await?;
    Ok(ApiResponse::ok(snapshot))
}

pub async fn reset_game(
    State(state): State<WebServerState>,
    payload: Result<Json<GameIdRequest>, JsonRejection>,
) -> ApiResult<GameSnapshot> {
    let Json(request) = payload?;
    let snapshot = state.service.reset_session(&request.game_id).await?;
    Ok(ApiResponse::ok(snapshot))
}

pub async fn change_difficulty(
    State(state): State<WebServerState>,
    payload: Result<Json<ChangeDifficultyRequest>, JsonRejection>,
) -> ApiResult<GameSnapshot> {
    let Json(request) = payload?;
    let difficulty: Difficulty = request.difficulty.parse()?;
    let snapshot = state
        .service
        .change_difficulty(&request.game_id, difficulty)
        .await?;
    Ok(ApiResponse::ok(snapshot))
}

pub async fn stats(State(state): State<WebServerState>) -> Json<ApiResponse<AggregateStats>> {
    ApiResponse::ok(state.service.get_aggregate_stats().await)
}

/// Missing values take the default silently; unparseable ones are logged first.
fn parse_or_default<T>(value: Option<&str>, default: T) -> T
where
    T: std::str::FromStr<Err = GameError> + Copy,
{
    match value.map(str::parse) {
        None => default,
        Some(Ok(parsed)) => parsed,
        Some(Err(err)) => {
            log_warn!("{}, falling back to default", err);
            default
        }
    }
}
