use sniffr::{env, init_rocket, telemetry::init_tracing};
use sqlx::SqlitePool;
use tracing::{error, info};

#[rocket::launch]
async fn rocket() -> _ {
    init_tracing();
    env::load_environment().expect("Failed to load environment");

    let database_url = env::database_url();

    let pool = SqlitePool::connect(&database_url)
        .await
        .expect("Failed to connect to SQLite database");

    info!("Running database migrations...");
    match sqlx::migrate!("./migrations").run(&pool).await {
        Ok(_) => info!("Migrations completed successfully"),
        Err(e) => {
            error!("Failed to run migrations: {}", e);
            panic!("Database migration failed: {}", e);
        }
    }

    init_rocket(pool).await
}
