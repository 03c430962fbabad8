use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::{self, Question};
use crate::server::app::AppState;
use crate::server::error::{ApiError, JsonResult};

#[derive(Deserialize)]
struct QuizRequest {
    previous_questions: Option<Vec<i64>>,
    quiz_category: Option<QuizCategory>,
}

/// Clients send `{id, type}`; id 0 selects the whole store.
#[derive(Deserialize)]
struct QuizCategory {
    id: i64,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
}

/// Uniform pick from the candidates that were not seen yet. Filtering before
/// drawing keeps the work bounded even when the seen list and the pool
/// disagree; an exhausted pool yields None.
fn pick_unseen(candidates: Vec<Question>, seen: &[i64]) -> Option<Question> {
    let unseen: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !seen.contains(&q.id))
        .collect();

    unseen.choose(&mut rand::thread_rng()).cloned()
}

async fn get_quiz_question(
    State(pool): State<SqlitePool>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> JsonResult<QuizResponse> {
    let Json(request) = payload.map_err(|_| ApiError::BadRequest)?;
    let previous = request.previous_questions.ok_or(ApiError::BadRequest)?;
    let category = request.quiz_category.ok_or(ApiError::BadRequest)?;

    let candidates = if category.id == 0 {
        db::questions::get_all_questions(&pool).await?
    } else {
        db::questions::get_questions_for_category(&pool, category.id).await?
    };

    Ok(Json(QuizResponse {
        success: true,
        question: pick_unseen(candidates, &previous),
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(get_quiz_question))
        .with_state(state)
}
