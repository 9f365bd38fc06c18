//! Recording catalog contract and its adapters.

pub mod fs;
pub mod repository;
