// larder-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)] // Not enforced yet

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts for storage, catalog and remote collaborators.
pub mod ports;

// 2. Domain (business core)
// Units, food cards, recipe matching, fuzzy search, routines.
// Depends on nothing else (neither infra nor app).
pub mod domain;

// 3. Infrastructure (Adapters)
// DuckDB store, YAML config, catalog import, change-feed reader.
// Depends on Domain and Ports.
pub mod infrastructure;

// 4. Application (Use Cases)
// Orchestration (recipe filtering, stock, routines, sync).
// Depends on Domain, Infra and Ports.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use larder_core::LarderError;
pub use error::LarderError;
