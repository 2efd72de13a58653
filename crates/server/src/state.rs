use sea_orm::DatabaseConnection;

/// Shared handler state: the pooled store connection and nothing else.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}
