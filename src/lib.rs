pub mod app_state;
pub mod config;
pub mod engine;
pub mod errors;
pub mod graphql;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;
