//! Bistro API library.
//!
//! This crate provides the ordering backend as a library, allowing it to be
//! tested and reused by the binary in `main.rs`.
//!
//! # Architecture
//!
//! - Axum web framework serving a JSON API
//! - `PostgreSQL` via sqlx for all persistent state (users, menu, reviews,
//!   cart entries, payments)
//! - HS256 session tokens; the access gate re-reads stored roles on every
//!   admin-gated request
//! - A Stripe-compatible charge processor consumed over HTTP

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
