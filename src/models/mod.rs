//! Core data models for extracted paper records.

mod paper;

pub use paper::Paper;
