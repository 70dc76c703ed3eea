// ==========================================
// Tire registry - API layer
// ==========================================
// Business operations behind the HTTP routes in app::routes
// ==========================================

pub mod error;
pub mod import_api;
pub mod tire_api;

pub use error::{ApiError, ApiResult};
pub use import_api::{summary_message, ImportApi, ImportApiResponse};
pub use tire_api::{CountResponse, MessageResponse, TireApi};
