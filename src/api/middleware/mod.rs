// Middleware module - contains observability and CORS configuration

pub mod cors;
pub mod observability;

pub use cors::create_cors_layer;
