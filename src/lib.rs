pub mod api;
pub mod calculators;
pub mod config;
pub mod core;
pub mod error;
pub mod reference;
