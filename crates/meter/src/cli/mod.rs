//! Command-line client for a running meter server

pub mod client;
pub mod commands;
pub mod display;
