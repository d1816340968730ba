//! Server crate for the movie-match recommender.
//!
//! This crate contains the orchestrator that builds the corpus statistics
//! once and answers recommendation requests against them.

pub mod config;
pub mod orchestrator;

pub use config::RecommenderConfig;
pub use orchestrator::{MovieRecommendation, RecommendationOrchestrator, RecommendationRequest};
