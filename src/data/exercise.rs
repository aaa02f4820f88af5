//! Exercise records and the merged exercise set
//!
//! Upstream returns one page per muscle filter. `ExerciseSet::merge` folds the
//! primary page and the secondary page into a single set keyed by exercise id.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// A single exercise record as returned by the upstream API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Upstream identifier, unique per record
    pub id: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// May contain HTML markup
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Category code
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: u32,
    /// Primary muscle identifiers
    #[serde(default, deserialize_with = "null_as_default")]
    pub muscles: Vec<u32>,
    /// Secondary (assisting) muscle identifiers
    #[serde(default, deserialize_with = "null_as_default")]
    pub muscles_secondary: Vec<u32>,
    /// Equipment identifiers
    #[serde(default, deserialize_with = "null_as_default")]
    pub equipment: Vec<u32>,
}

/// Decodes an explicit `null` the same way as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Exercise {
    /// Whether the exercise declares at least one secondary muscle
    pub fn has_secondary_muscles(&self) -> bool {
        !self.muscles_secondary.is_empty()
    }
}

/// Exercises keyed by id; no duplicate identifiers
///
/// Iteration order is unspecified. Use [`ExerciseSet::to_sorted_vec`] when a
/// stable order is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseSet {
    by_id: HashMap<u32, Exercise>,
}

impl ExerciseSet {
    /// Merges primary-filter and secondary-filter results
    ///
    /// Primary records are inserted first, then secondary records. On an id
    /// collision the secondary record replaces the primary one.
    pub fn merge(primary: Vec<Exercise>, secondary: Vec<Exercise>) -> Self {
        let mut by_id = HashMap::with_capacity(primary.len() + secondary.len());
        for exercise in primary.into_iter().chain(secondary) {
            by_id.insert(exercise.id, exercise);
        }
        Self { by_id }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Exercise> {
        self.by_id.get(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.by_id.values()
    }

    /// Returns the exercises ordered by id
    pub fn to_sorted_vec(&self) -> Vec<&Exercise> {
        let mut exercises: Vec<&Exercise> = self.by_id.values().collect();
        exercises.sort_by_key(|e| e.id);
        exercises
    }
}

/// Exercise record as exposed to callers, with markup stripped from the description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSummary {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub category: u32,
    pub muscles: Vec<u32>,
    pub muscles_secondary: Vec<u32>,
    pub equipment: Vec<u32>,
}

impl From<&Exercise> for ExerciseSummary {
    fn from(exercise: &Exercise) -> Self {
        Self {
            id: exercise.id,
            name: exercise.name.clone(),
            description: strip_html(&exercise.description).trim().to_string(),
            category: exercise.category,
            muscles: exercise.muscles.clone(),
            muscles_secondary: exercise.muscles_secondary.clone(),
            equipment: exercise.equipment.clone(),
        }
    }
}

/// Aggregated response for one muscle lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisesResponse {
    /// Normalized muscle name the lookup was made for
    pub muscle: String,
    pub exercises: Vec<ExerciseSummary>,
    /// Related muscle groups, possibly empty
    pub similar_muscles: Vec<String>,
    pub advice: String,
}

/// Matches an HTML tag, `<` through the next `>`
static TAG_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]*>").ok());

/// Removes HTML tags; a `<` without a closing `>` is kept as text
pub fn strip_html(input: &str) -> String {
    match TAG_PATTERN.as_ref() {
        Some(re) => re.replace_all(input, "").into_owned(),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(id: u32, name: &str, secondary: &[u32]) -> Exercise {
        Exercise {
            id,
            name: name.to_string(),
            description: String::new(),
            category: 11,
            muscles: vec![4],
            muscles_secondary: secondary.to_vec(),
            equipment: vec![],
        }
    }

    #[test]
    fn test_merge_deduplicates_by_id() {
        let primary = vec![exercise(1, "Bench", &[]), exercise(2, "Fly", &[])];
        let secondary = vec![exercise(2, "Fly", &[5]), exercise(3, "Dip", &[5])];

        let set = ExerciseSet::merge(primary, secondary);

        assert_eq!(set.len(), 3);
        assert!(set.contains(1));
        assert!(set.contains(2));
        assert!(set.contains(3));
    }

    #[test]
    fn test_merge_secondary_wins_on_collision() {
        let primary = vec![exercise(7, "Push-up (primary)", &[])];
        let secondary = vec![exercise(7, "Push-up (secondary)", &[2, 5])];

        let set = ExerciseSet::merge(primary, secondary.clone());

        assert_eq!(set.get(7), Some(&secondary[0]));
    }

    #[test]
    fn test_merge_of_empty_pages_is_empty() {
        let set = ExerciseSet::merge(vec![], vec![]);
        assert!(set.is_empty());
    }

    #[test]
    fn test_merge_collapses_duplicates_within_one_page() {
        let primary = vec![exercise(1, "first", &[]), exercise(1, "second", &[])];
        let set = ExerciseSet::merge(primary, vec![]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(1).map(|e| e.name.as_str()), Some("second"));
    }

    #[test]
    fn test_sorted_vec_orders_by_id() {
        let set = ExerciseSet::merge(
            vec![exercise(30, "c", &[]), exercise(10, "a", &[])],
            vec![exercise(20, "b", &[])],
        );
        let ids: Vec<u32> = set.to_sorted_vec().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn test_exercise_deserializes_upstream_record() {
        let json = r#"{
            "id": 192,
            "name": "Bench Press",
            "description": "<p>Lie down on a flat bench.</p>",
            "category": 11,
            "muscles": [4],
            "muscles_secondary": [2, 5],
            "equipment": [1, 8],
            "uuid": "ignored"
        }"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(exercise.id, 192);
        assert_eq!(exercise.muscles_secondary, vec![2, 5]);
        assert!(exercise.has_secondary_muscles());
    }

    #[test]
    fn test_summary_strips_markup() {
        let mut e = exercise(1, "Bench", &[]);
        e.description = "<p>Keep your <b>back</b> flat.</p>\n".to_string();
        let summary = ExerciseSummary::from(&e);
        assert_eq!(summary.description, "Keep your back flat.");
    }

    #[test]
    fn test_strip_html_leaves_plain_text() {
        assert_eq!(strip_html("no tags 3 > 2"), "no tags 3 > 2");
        assert_eq!(strip_html("<ul><li>one</li></ul>"), "one");
    }

    #[test]
    fn test_strip_html_keeps_unclosed_angle_bracket() {
        assert_eq!(strip_html("<p>Use < 5kg plates</p>"), "Use < 5kg plates");
        assert_eq!(strip_html("reps < 10"), "reps < 10");
    }

    #[test]
    fn test_exercise_null_fields_decode_as_empty() {
        let json = r#"{
            "id": 5,
            "name": null,
            "description": null,
            "category": null,
            "muscles": null,
            "muscles_secondary": null,
            "equipment": null
        }"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(exercise.id, 5);
        assert!(exercise.name.is_empty());
        assert!(exercise.description.is_empty());
        assert_eq!(exercise.category, 0);
        assert!(exercise.muscles.is_empty());
        assert!(!exercise.has_secondary_muscles());
        assert!(exercise.equipment.is_empty());
    }

    #[test]
    fn test_exercise_missing_fields_decode_as_empty() {
        let exercise: Exercise = serde_json::from_str(r#"{"id": 6}"#).unwrap();
        assert_eq!(exercise.id, 6);
        assert!(exercise.muscles_secondary.is_empty());
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = ExercisesResponse {
            muscle: "chest".to_string(),
            exercises: vec![],
            similar_muscles: vec!["triceps".to_string()],
            advice: "x".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["similarMuscles"][0], "triceps");
        assert!(json.get("similar_muscles").is_none());
    }
}
