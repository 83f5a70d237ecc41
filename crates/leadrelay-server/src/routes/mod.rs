//! HTTP route handlers for the relay server.
//!
//! - `contact`: `POST /api/contact`, the lead submission relay
//! - `health`: `GET /api/health`

pub mod contact;
pub mod health;
