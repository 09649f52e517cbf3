//! coursecheck-core: question catalog, scoring and recommendations.
//!
//! This crate defines the questionnaire data model, the weighted scoring
//! engine, the recommendation knowledge base and the assessment record
//! that the rest of coursecheck builds on.

pub mod assessment;
pub mod audit;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod level;
pub mod model;
pub mod recommend;
pub mod scoring;
