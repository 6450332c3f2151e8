#[macro_use]
extern crate rocket;

pub mod api;
pub mod auth;
pub mod db;
pub mod env;
pub mod error;
pub mod models;
pub mod projection;
pub mod telemetry;
#[cfg(test)]
mod test;

use api::{api_create_user, api_get_dog, api_login, api_logout, api_post_dog, health};
use rocket::{Build, Rocket};
use sqlx::SqlitePool;
use telemetry::TelemetryFairing;
use tracing::info;

pub async fn init_rocket(pool: SqlitePool) -> Rocket<Build> {
    info!("Starting sniffr");

    rocket::build()
        .manage(pool)
        .mount(
            "/",
            routes![
                api_login,
                api_logout,
                api_create_user,
                api_get_dog,
                api_post_dog,
                health,
            ],
        )
        .attach(TelemetryFairing)
}
