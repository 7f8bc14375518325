//! Meter - usage records, comparisons and predictions over HTTP
//!
//! A small REST facade over a DynamoDB table of usage records and a Lambda
//! prediction function, plus a CLI client for it.

pub mod cli;
pub mod config;
pub mod error;
pub mod server;
