//! MentorLink API service
//!
//! REST endpoints over user accounts and the mentor directory. The binary in
//! `main.rs` wires configuration, storage and logging around [`routes::create_router`].

pub mod config;
pub mod error;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;
