use tracing_subscriber::EnvFilter;

use std::error::Error;

use worktravel::build_rocket;
use worktravel::data::AppConfig;
use worktravel::storage::SqliteKeyValueStore;
use worktravel::todo::store::ToDoStore;

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config: AppConfig = rocket::Config::figment().extract()?;
    let storage = SqliteKeyValueStore::open(&config.todo_db)?;
    let store = ToDoStore::load(Box::new(storage));

    build_rocket(store).launch().await?;

    Ok(())
}
