//! Cache module for storing API responses in memory
//!
//! This module provides a process-local, time-expiring cache for raw API
//! response bytes. A background sweep task evicts entries once their age
//! exceeds the configured TTL (time-to-live). Lookups never check age
//! themselves, so expiration is best-effort rather than immediate-on-access.

mod expiring;

pub use expiring::Cache;
