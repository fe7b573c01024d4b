//! Utility functions

pub mod sector;
