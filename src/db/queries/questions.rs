use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Serialize, Deserialize, FromRow, Clone, Debug)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE category = ?1
ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

// LIKE is case-insensitive for ASCII in sqlite, which is what the search
// endpoint promises. `%` and `_` in the term act as wildcards, same as the
// classic ilike('%term%') search this replaces.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let pattern = format!("%{}%", term);
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE question LIKE ?1
ORDER BY id
        "#,
    )
    .bind(pattern)
    .fetch_all(pool)
    .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn count_questions(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await
}

pub async fn create_question(
    pool: &SqlitePool,
    question: &str,
    answer: &str,
    category: i64,
    difficulty: i64,
) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(question)
    .bind(answer)
    .bind(category)
    .bind(difficulty)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Returns the number of removed rows; zero means the id did not exist.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let affected = sqlx::query("DELETE FROM questions WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected)
}
