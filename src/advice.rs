//! Training advice heuristic
//!
//! Derives a one-line piece of advice from the shape of an exercise set.
//! This is a static rule of thumb, not a model.

use crate::data::ExerciseSet;

/// Advice categories produced by [`advise`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    /// Nothing matched the filters
    BroadenFilters,
    /// More than half of the exercises involve secondary muscles
    WarmUpAndIsolation,
    /// Everything else, ties included
    Balanced,
}

impl Advice {
    /// Returns the human-readable advice text
    pub fn text(&self) -> &'static str {
        match self {
            Advice::BroadenFilters => "Try broad compound movements and re-check your filters.",
            Advice::WarmUpAndIsolation => {
                "Include specific warm-up sets and isolation moves before compounds."
            }
            Advice::Balanced => "Balance compounds with accessory work; keep proper form.",
        }
    }
}

/// Classifies an exercise set.
///
/// Counts exercises that declare at least one secondary muscle. Strictly more
/// than half of the set leads to [`Advice::WarmUpAndIsolation`]; exactly half
/// or less leads to [`Advice::Balanced`].
pub fn advise(exercises: &ExerciseSet) -> Advice {
    if exercises.is_empty() {
        return Advice::BroadenFilters;
    }

    let with_secondary = exercises
        .iter()
        .filter(|e| e.has_secondary_muscles())
        .count();

    if with_secondary * 2 > exercises.len() {
        Advice::WarmUpAndIsolation
    } else {
        Advice::Balanced
    }
}
