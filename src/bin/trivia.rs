use clap::Parser;
use trivia_api::server::app::run_server;
use trivia_api::telemetry::init_tracing;
use trivia_api::db;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Address the HTTP server binds on.
    #[clap(long, default_value = "0.0.0.0:8080")]
    addr: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    dotenv::dotenv().ok();
    let path = dotenv::var("DB_PATH").expect("DB_PATH must be set");
    let pool = db::establish_connection(&path).await?;

    tracing::info!("Running db migrations...");
    db::run_migrations(&pool).await?;

    run_server(pool, &cli.addr).await?;
    Ok(())
}
