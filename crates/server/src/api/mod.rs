pub mod error;
pub mod handlers;
pub mod links;
pub mod middleware;
pub mod routes;
pub mod tickets;

pub use routes::create_router;
