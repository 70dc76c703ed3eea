// ==========================================
// Tire registry - application layer
// ==========================================
// HTTP wiring: shared state + axum router
// ==========================================

pub mod routes;
pub mod state;

pub use routes::app_router;
pub use state::AppState;
