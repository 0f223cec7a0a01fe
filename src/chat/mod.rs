//! Asylum AI helper chat endpoint

pub mod handlers;
pub mod models;
pub mod prompt;
pub mod routes;

#[cfg(test)]
mod tests;

pub use routes::chat_routes;
