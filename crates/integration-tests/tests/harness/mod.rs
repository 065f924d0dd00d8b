//! Shared test harness; each test binary uses a subset of it
#![allow(dead_code)]

pub mod config;
pub mod mock_gemini;
pub mod server;
