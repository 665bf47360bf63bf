pub mod error;

// Snapshot diff value types
pub mod catalog;
