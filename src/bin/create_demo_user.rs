// Creates the demo account used for local testing.

use std::path::PathBuf;

use anyhow::Context;
use tutor_cascade::services::auth::hash_password;
use tutor_cascade::storage::{ConfigService, Database};
use tutor_cascade::utils::paths;

const DEMO_USERNAME: &str = "demo_user";
const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "demo_password";

fn main() -> anyhow::Result<()> {
    let config_service = ConfigService::new().context("failed to load configuration")?;
    let db_path = match &config_service.get_config().database_path {
        Some(path) => PathBuf::from(path),
        None => paths::database_path()?,
    };
    let db = Database::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;

    if db.find_user_by_username(DEMO_USERNAME)?.is_some() {
        println!("Demo user already exists!");
        return Ok(());
    }

    db.create_user(DEMO_USERNAME, DEMO_EMAIL, &hash_password(DEMO_PASSWORD))?;
    println!("Demo user created successfully!");
    println!("Username: {}", DEMO_USERNAME);
    println!("Password: {}", DEMO_PASSWORD);
    Ok(())
}
