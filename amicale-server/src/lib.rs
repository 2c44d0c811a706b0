//! Amicale Server - backend d'une application de gestion d'amicale
//!
//! # Architecture
//!
//! - **Annuaire des membres** (`api::membres`): CRUD et codes PIN
//! - **Réunions** (`api::reunions`): réunions et feuilles de présence
//! - **Trésorerie** (`api::tresorier`): livre des opérations du trésorier
//! - **Tableau de bord** (`api::dashboard`): agrégats par rôle
//! - **Exports** (`api::exports`): téléchargements CSV
//!
//! # Module structure
//!
//! ```text
//! amicale-server/src/
//! ├── core/          # configuration, état, serveur HTTP
//! ├── api/           # routes et handlers
//! ├── db/            # pool SQLite, migrations, repositories
//! ├── export/        # formatage CSV
//! └── utils/         # erreurs, logger, validation
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod export;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, then initialize the logger from the environment.
pub fn setup_environment() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ___              _            __
   /   |  ____ ___  (_)________ _/ /__
  / /| | / __ `__ \/ / ___/ __ `/ / _ \
 / ___ |/ / / / / / / /__/ /_/ / /  __/
/_/  |_/_/ /_/ /_/_/\___/\__,_/_/\___/
    "#
    );
}
