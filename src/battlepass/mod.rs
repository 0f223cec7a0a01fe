//! Battlepass season config, reward tiers and reward image uploads

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
mod tests;

pub use routes::battlepass_routes;
