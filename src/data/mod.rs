//! Core data models and upstream clients
//!
//! This module contains the muscle catalog, the exercise records returned by
//! the upstream API, the client that fetches them, and the similar-muscles
//! side table.

pub mod advice_slip;
pub mod catalog;
pub mod exercise;
pub mod similar;
pub mod wger;

pub use advice_slip::AdviceSlipClient;
pub use catalog::{available_muscles, resolve, CatalogError};
pub use exercise::{Exercise, ExerciseSet, ExerciseSummary, ExercisesResponse};
pub use similar::SimilarMuscles;
pub use wger::{MuscleFilter, WgerClient, WgerError};
