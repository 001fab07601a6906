/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the database handle pools internally).
#[derive(Clone)]
pub struct AppState {
    /// Handle to the application database.
    pub db: menagerie_db::Db,
}
