use serde::Serialize;
use std::sync::Arc;
use warp::Filter;
use warp::http::StatusCode;

use crate::game_manager::GameManager;
use game_types::{
    CreateGameRequest, ErrorResponse, GameError, GameStateResponse, RoundState,
    SubmitAnswerRequest, SubmitVoteRequest,
};

pub mod config;
pub mod game_manager;

const MAX_BODY_BYTES: u64 = 16 * 1024;

type JsonReply = warp::reply::WithStatus<warp::reply::Json>;

pub fn create_routes(
    game_manager: Arc<GameManager>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let game_manager_filter = warp::any().map({
        let game_manager = game_manager.clone();
        move || game_manager.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let get_game = warp::path!("game")
        .and(warp::get())
        .and(game_manager_filter.clone())
        .and_then(handle_get_game);

    let create_game = warp::path!("game")
        .and(warp::post())
        .and(json_body::<CreateGameRequest>())
        .and(game_manager_filter.clone())
        .and_then(handle_create_game);

    let reset_game = warp::path!("game")
        .and(warp::delete())
        .and(game_manager_filter.clone())
        .and_then(handle_reset_game);

    let submit_answer = warp::path!("game" / "answers")
        .and(warp::post())
        .and(json_body::<SubmitAnswerRequest>())
        .and(game_manager_filter.clone())
        .and_then(handle_submit_answer);

    let start_voting = warp::path!("game" / "voting")
        .and(warp::post())
        .and(game_manager_filter.clone())
        .and_then(handle_start_voting);

    let submit_vote = warp::path!("game" / "votes")
        .and(warp::post())
        .and(json_body::<SubmitVoteRequest>())
        .and(game_manager_filter.clone())
        .and_then(handle_submit_vote);

    let results = warp::path!("game" / "results")
        .and(warp::get())
        .and(game_manager_filter.clone())
        .and_then(handle_results);

    let next_round = warp::path!("game" / "next-round")
        .and(warp::post())
        .and(game_manager_filter.clone())
        .and_then(handle_next_round);

    let change_word = warp::path!("game" / "word")
        .and(warp::post())
        .and(game_manager_filter.clone())
        .and_then(handle_change_word);

    let leaderboard = warp::path!("game" / "leaderboard")
        .and(warp::get())
        .and(game_manager_filter.clone())
        .and_then(handle_leaderboard);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST", "DELETE"]);

    health
        .or(get_game)
        .or(create_game)
        .or(reset_game)
        .or(submit_answer)
        .or(start_voting)
        .or(submit_vote)
        .or(results)
        .or(next_round)
        .or(change_word)
        .or(leaderboard)
        .with(cors)
        .with(warp::log("bluff_dictionary"))
}

fn json_body<T>() -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone
where
    T: serde::de::DeserializeOwned + Send,
{
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

fn status_for(err: &GameError) -> StatusCode {
    match err {
        _ if err.is_contract_violation() => StatusCode::BAD_REQUEST,
        GameError::NoGameInProgress => StatusCode::NOT_FOUND,
        GameError::EmptyWordCatalog => StatusCode::INTERNAL_SERVER_ERROR,
        // wrong phase, or a word change after answers exist
        _ => StatusCode::CONFLICT,
    }
}

fn json_reply<T: Serialize>(value: &T, status: StatusCode) -> JsonReply {
    warp::reply::with_status(warp::reply::json(value), status)
}

fn error_reply(err: GameError) -> JsonReply {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!("Request failed: {}", err);
    } else {
        tracing::debug!("Request rejected: {}", err);
    }
    json_reply(
        &ErrorResponse {
            error: err.to_string(),
        },
        status,
    )
}

fn state_reply(result: Result<RoundState, GameError>) -> JsonReply {
    match result {
        Ok(state) => json_reply(&GameStateResponse::from(state), StatusCode::OK),
        Err(err) => error_reply(err),
    }
}

async fn handle_get_game(game_manager: Arc<GameManager>) -> Result<JsonReply, warp::Rejection> {
    let state = game_manager
        .current_state()
        .await
        .ok_or(GameError::NoGameInProgress);
    Ok(state_reply(state))
}

async fn handle_create_game(
    request: CreateGameRequest,
    game_manager: Arc<GameManager>,
) -> Result<JsonReply, warp::Rejection> {
    let result = game_manager.create_game(&request.team_names).await;
    Ok(match result {
        Ok(state) => json_reply(&GameStateResponse::from(state), StatusCode::CREATED),
        Err(err) => error_reply(err),
    })
}

async fn handle_reset_game(game_manager: Arc<GameManager>) -> Result<JsonReply, warp::Rejection> {
    game_manager.reset().await;
    Ok(json_reply(&serde_json::json!({ "reset": true }), StatusCode::OK))
}

async fn handle_submit_answer(
    request: SubmitAnswerRequest,
    game_manager: Arc<GameManager>,
) -> Result<JsonReply, warp::Rejection> {
    let result = game_manager
        .submit_answer(request.team_id.as_deref(), &request.answer)
        .await;
    Ok(state_reply(result))
}

async fn handle_start_voting(game_manager: Arc<GameManager>) -> Result<JsonReply, warp::Rejection> {
    Ok(state_reply(game_manager.start_voting().await))
}

async fn handle_submit_vote(
    request: SubmitVoteRequest,
    game_manager: Arc<GameManager>,
) -> Result<JsonReply, warp::Rejection> {
    let result = game_manager
        .submit_vote(request.team_id.as_deref(), request.answer_index)
        .await;
    Ok(state_reply(result))
}

async fn handle_results(game_manager: Arc<GameManager>) -> Result<JsonReply, warp::Rejection> {
    Ok(match game_manager.round_summary().await {
        Ok(summary) => json_reply(&summary, StatusCode::OK),
        Err(err) => error_reply(err),
    })
}

async fn handle_next_round(game_manager: Arc<GameManager>) -> Result<JsonReply, warp::Rejection> {
    Ok(state_reply(game_manager.next_round().await))
}

async fn handle_change_word(game_manager: Arc<GameManager>) -> Result<JsonReply, warp::Rejection> {
    Ok(state_reply(game_manager.change_word().await))
}

async fn handle_leaderboard(game_manager: Arc<GameManager>) -> Result<JsonReply, warp::Rejection> {
    Ok(match game_manager.leaderboard().await {
        Ok(leaderboard) => json_reply(&leaderboard, StatusCode::OK),
        Err(err) => error_reply(err),
    })
}
