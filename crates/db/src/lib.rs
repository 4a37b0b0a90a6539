pub mod errors;
pub mod models;
pub mod pool;
pub mod queries;
pub mod retry;

pub use errors::BookingRepoError;
pub use pool::{create_pool, Pool};

/// Embedded migrations, run at boot by both `salon-api` and `salon-jobs`
/// via `sqlx`'s `migrate` feature.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
