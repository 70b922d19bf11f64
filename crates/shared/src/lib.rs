pub mod domain;
pub mod error;
pub mod events;

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod domain_tests;
