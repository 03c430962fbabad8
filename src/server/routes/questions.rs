use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::{self, Question};
use crate::server::app::AppState;
use crate::server::error::{ApiError, JsonResult};
use crate::server::pagination::{paginate, PageQuery};

use super::categories::category_map;

/// The POST body multiplexes two operations; a `searchTerm` key selects
/// search, anything else is treated as a create.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionsAction {
    Search(SearchRequest),
    Create(CreateRequest),
}

#[derive(Deserialize)]
struct SearchRequest {
    #[serde(rename = "searchTerm")]
    search_term: String,
}

#[derive(Deserialize)]
struct CreateRequest {
    question: Option<String>,
    answer: Option<String>,
    category: Option<i64>,
    difficulty: Option<i64>,
}

#[derive(Serialize)]
struct QuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct SearchResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
}

#[derive(Serialize)]
struct CreateResponse {
    success: bool,
    created: i64,
}

#[derive(Serialize)]
struct DeleteResponse {
    success: bool,
    deleted: i64,
}

async fn get_questions(
    State(pool): State<SqlitePool>,
    Query(paging): Query<PageQuery>,
) -> JsonResult<QuestionsResponse> {
    let selection = db::questions::get_all_questions(&pool).await?;
    let total_questions = selection.len() as i64;
    let questions = paginate(&selection, paging.page).to_vec();
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsResponse {
        success: true,
        questions,
        total_questions,
        categories: category_map(&pool).await?,
    }))
}

async fn create_or_search(
    State(pool): State<SqlitePool>,
    Query(paging): Query<PageQuery>,
    payload: Result<Json<QuestionsAction>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(action) = payload.map_err(|_| ApiError::BadRequest)?;
    match action {
        QuestionsAction::Search(request) => search_questions(&pool, request, paging.page).await,
        QuestionsAction::Create(request) => create_question(&pool, request).await,
    }
}

async fn search_questions(
    pool: &SqlitePool,
    request: SearchRequest,
    page: usize,
) -> Result<Response, ApiError> {
    if request.search_term.is_empty() {
        return Err(ApiError::Unprocessable);
    }

    let selection = db::questions::search_questions(pool, &request.search_term).await?;
    let questions = paginate(&selection, page).to_vec();
    // an empty match set is a valid empty page; total reports the whole store
    let total_questions = db::questions::count_questions(pool).await?;

    Ok(Json(SearchResponse {
        success: true,
        questions,
        total_questions,
    })
    .into_response())
}

async fn create_question(pool: &SqlitePool, request: CreateRequest) -> Result<Response, ApiError> {
    let question = request
        .question
        .filter(|q| !q.is_empty())
        .ok_or(ApiError::Unprocessable)?;
    let answer = request
        .answer
        .filter(|a| !a.is_empty())
        .ok_or(ApiError::Unprocessable)?;
    let category = request.category.ok_or(ApiError::Unprocessable)?;
    let difficulty = request.difficulty.ok_or(ApiError::Unprocessable)?;

    let created = db::questions::create_question(pool, &question, &answer, category, difficulty)
        .await
        .map_err(|error| {
            tracing::error!(%error, "failed to insert question");
            ApiError::Unprocessable
        })?;

    Ok(Json(CreateResponse {
        success: true,
        created,
    })
    .into_response())
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> JsonResult<DeleteResponse> {
    let affected = db::questions::delete_question(&pool, id)
        .await
        .map_err(|error| {
            tracing::error!(%error, id, "failed to delete question");
            ApiError::Unprocessable
        })?;
    if affected == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(Json(DeleteResponse {
        success: true,
        deleted: id,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(create_or_search))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
