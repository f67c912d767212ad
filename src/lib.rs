//! Core library for the `stampede` CLI.
//!
//! `stampede` issues a fixed number of GET requests against one URL with a
//! bounded number in flight, then reports how many responses came back with
//! each status code. The binary is a thin wrapper: it parses flags and an
//! optional config file into a [`http::LoadSpec`], runs the dispatch engine
//! and prints the [`report`].
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod report;
