//! API endpoint modules.

pub mod analysis;
pub mod cases;
pub mod chat;
pub mod documents;
pub mod health;
pub mod openapi;

pub use analysis::configure_routes as configure_analysis_routes;
pub use cases::configure_routes as configure_case_routes;
pub use chat::configure_routes as configure_chat_routes;
pub use documents::configure_routes as configure_document_routes;
pub use health::configure_health_routes;
pub use openapi::ApiDoc;
