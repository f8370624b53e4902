//! Weather Search - terminal search form for a `/api/weather/{city}` backend
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod logging;
pub mod reducer;
pub mod state;
