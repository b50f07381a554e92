//! Catalog Client - Rate-Limited API Access
//!
//! This crate implements an asynchronous client for the catalog service
//! HTTP API. Every outbound request is paced by a configurable call
//! throttle, so the client never exceeds the service's published rate
//! limits even when many tasks share a single client instance.

pub mod client;
pub mod config;
pub mod error;
pub mod throttle;
