//! Shoplane server library.
//!
//! This crate provides the REST backend as a library, allowing it to be
//! tested and reused. The `shoplane-server` binary is a thin wrapper over
//! [`routes::app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
