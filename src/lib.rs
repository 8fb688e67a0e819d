//! Pokedex CLI Library
//!
//! This module exposes the cache, API, CLI, and command modules for use in
//! integration tests.

pub mod api;
pub mod cache;
pub mod cli;
pub mod commands;
