use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::{self, Question};
use crate::server::app::AppState;
use crate::server::error::{ApiError, JsonResult};
use crate::server::pagination::{paginate, PageQuery};

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    current_category: String,
}

pub(crate) async fn category_map(pool: &SqlitePool) -> sqlx::Result<BTreeMap<i64, String>> {
    Ok(db::categories::get_all_categories(pool)
        .await?
        .into_iter()
        .map(|c| (c.id, c.kind))
        .collect())
}

async fn get_categories(State(pool): State<SqlitePool>) -> JsonResult<CategoriesResponse> {
    let categories = category_map(&pool).await?;
    // an empty store reads as absence, not as an empty success
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

async fn get_category_questions(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Query(paging): Query<PageQuery>,
) -> JsonResult<CategoryQuestionsResponse> {
    let category = db::categories::get_category(&pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let selection = db::questions::get_questions_for_category(&pool, id).await?;
    let questions = paginate(&selection, paging.page).to_vec();
    // total reports the whole store, same as search
    let total_questions = db::questions::count_questions(&pool).await?;

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions,
        total_questions,
        current_category: category.kind,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(get_category_questions))
        .with_state(state)
}
