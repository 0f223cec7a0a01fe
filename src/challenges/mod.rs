//! Weekly challenge rotation for the public site

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
mod tests;

pub use routes::challenges_routes;
