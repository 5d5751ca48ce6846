//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod buckets;
pub mod footer;
pub mod header;
pub mod indicators;
pub mod logs;
pub mod quadrant;
pub mod status;
