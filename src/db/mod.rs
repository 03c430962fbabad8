pub mod queries;

use sqlx::sqlite::SqlitePool;
use sqlx::Error;

pub use queries::categories;
pub use queries::categories::Category;
pub use queries::questions;
pub use queries::questions::Question;

pub async fn establish_connection(path: &str) -> Result<SqlitePool, Error> {
    SqlitePool::connect(format!("sqlite:{}", path).as_str()).await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
