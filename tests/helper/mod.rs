//! Shared test utilities
#![allow(dead_code)]

pub mod finder;
pub mod git;

pub use git::TestRepo;
