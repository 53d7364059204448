//! Shared fixtures for the canopy integration tests.

pub mod test_components;
