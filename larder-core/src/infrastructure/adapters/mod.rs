pub mod duckdb;
pub mod feed;
