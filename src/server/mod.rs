//! Stand-in for the application directory and graph fetch service.

mod routes;

pub use routes::{router, serve, serve_on};
