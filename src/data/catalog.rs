//! Static muscle catalog
//!
//! Maps human-readable muscle-group names to the numeric muscle identifiers
//! used by the upstream API. Aggregate groups such as "back" map to several
//! identifiers.

use thiserror::Error;

/// A named muscle group and the upstream identifiers it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MuscleGroup {
    /// Canonical lower-case name
    pub name: &'static str,
    /// Upstream muscle identifiers
    pub ids: &'static [u32],
}

/// Static table of all supported muscle groups
pub static MUSCLE_GROUPS: [MuscleGroup; 16] = [
    MuscleGroup { name: "biceps", ids: &[1] },
    MuscleGroup { name: "shoulders", ids: &[2] },
    MuscleGroup { name: "neck", ids: &[3] },
    MuscleGroup { name: "chest", ids: &[4] },
    MuscleGroup { name: "triceps", ids: &[5] },
    MuscleGroup { name: "abs", ids: &[6] },
    MuscleGroup { name: "calves", ids: &[7] },
    MuscleGroup { name: "glutes", ids: &[8] },
    MuscleGroup { name: "forearms", ids: &[9] },
    MuscleGroup { name: "quadriceps", ids: &[10] },
    MuscleGroup { name: "quads", ids: &[10] },
    MuscleGroup { name: "hamstrings", ids: &[11] },
    MuscleGroup { name: "lats", ids: &[12] },
    MuscleGroup { name: "lower back", ids: &[13] },
    MuscleGroup { name: "trapezius", ids: &[14] },
    // lats + lower back + trapezius
    MuscleGroup { name: "back", ids: &[12, 13, 14] },
];

/// Errors that can occur when resolving a muscle name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Neither a known name nor a list of numeric identifiers
    #[error("unknown muscle group '{input}'; try one of: {}", .supported.join(", "))]
    UnknownMuscle {
        input: String,
        supported: Vec<String>,
    },
}

/// Lower-cases and trims a muscle name
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Looks up a muscle group by exact canonical name
pub fn get_muscle_group(name: &str) -> Option<&'static MuscleGroup> {
    MUSCLE_GROUPS.iter().find(|group| group.name == name)
}

/// Returns the sorted list of canonical muscle names
pub fn available_muscles() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = MUSCLE_GROUPS.iter().map(|group| group.name).collect();
    names.sort_unstable();
    names
}

/// Resolves a muscle name to its upstream identifiers
///
/// The name is matched case-insensitively after trimming. If it is not in the
/// catalog, a comma-separated list of numeric identifiers (e.g. `"4,5"`) is
/// accepted instead; empty segments are skipped.
///
/// # Example
///
/// ```
/// use fitagg::data::catalog::resolve;
///
/// assert_eq!(resolve(" Back ").unwrap(), vec![12, 13, 14]);
/// assert_eq!(resolve("4,5").unwrap(), vec![4, 5]);
/// assert!(resolve("wings").is_err());
/// ```
pub fn resolve(name: &str) -> Result<Vec<u32>, CatalogError> {
    let key = normalize(name);

    if let Some(group) = get_muscle_group(&key) {
        return Ok(group.ids.to_vec());
    }

    parse_id_list(&key).ok_or_else(|| CatalogError::UnknownMuscle {
        input: key,
        supported: available_muscles().into_iter().map(String::from).collect(),
    })
}

/// Parses `"4, 5,,6"` into `[4, 5, 6]`; `None` if any segment is not a
/// non-negative integer or nothing is left after skipping empty segments
fn parse_id_list(input: &str) -> Option<Vec<u32>> {
    let ids = input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<u32>().ok())
        .collect::<Option<Vec<u32>>>()?;

    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}
