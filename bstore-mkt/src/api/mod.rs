//! HTTP API handlers for bstore-mkt
//!
//! Thin glue between the route table and the marketplace facade. The
//! authenticated principal arrives as an explicit request parameter
//! (the external account directory fronts this service).

pub mod beats;
pub mod health;
pub mod profiles;

pub use beats::beat_routes;
pub use health::health_routes;
pub use profiles::profile_routes;
