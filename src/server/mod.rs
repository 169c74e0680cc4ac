//! HTTP server for the persona quiz.
//!
//! Exposes the classification engine as a JSON service for the quiz front end.
//!
//! # Endpoints
//!
//! - `GET  /health`          — Liveness probe
//! - `GET  /questions`       — Question registry (option effects only)
//! - `GET  /personas`        — All persona profiles
//! - `GET  /personas/:slug`  — One persona profile
//! - `POST /classify`        — Classify a 16-answer sequence
//! - `POST /share`           — Share links for a result

pub mod routes;

pub use routes::{app_router, AppState};
