//! Campus admin API client and headless table controllers
//!
//! A Rust async client for the campus administration API (schools, students,
//! scores, admins, activity logs) together with the remote list controller
//! that drives every paginated entity table of the dashboard.

pub mod api;
pub mod auth;
pub mod error;
pub mod model;
pub mod table;
pub mod ui;

mod client;

pub use client::*;
