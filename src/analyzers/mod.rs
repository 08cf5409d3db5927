//! Descriptive aggregation of cleaned sale records.
//!
//! Each view groups the dataset by its own key, computes price statistics
//! per group, and applies its own filter, ranking, and truncation. Views
//! never depend on one another, and an empty dataset yields empty views.

pub mod aggregate;
pub mod bins;
pub mod body;
pub mod types;
pub mod utility;
