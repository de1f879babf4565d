//! ipdb - an IP range geolocation lookup service
//!
//! This library provides the core functionality for the ipdb service:
//! precision-preserving address canonicalization, an interval-containment
//! range index backed by SeaORM, a bulk JSONL load pipeline, and the
//! HTTP lookup API.
//!
//! # Architecture
//! - `utils::precision`: address canonicalization (one shared function for
//!   the load path and the query path)
//! - `storage`: SeaORM storage handle, range queries and bulk mutations
//! - `loader`: line-delimited JSON bulk load pipeline (full replace)
//! - `api`: HTTP services (lookup, health)
//! - `cli`: command-line argument parsing
//! - `config`: configuration management
//! - `runtime`: application execution modes
//! - `system`: logging initialization

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod loader;
pub mod runtime;
pub mod storage;
pub mod system;
pub mod utils;
