//! Domain-specific assertions for skillmig harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* normalisation invariant was violated.

use bson::{Bson, Document};

/// Assert that every value of every `groupAverages` in a persisted update is
/// a BSON double.
///
/// ```rust
/// assert_averages_are_doubles!(fields);
/// ```
#[macro_export]
macro_rules! assert_averages_are_doubles {
    ($fields:expr) => {{
        let fields: &bson::Document = &$fields;
        for (i, entry) in $crate::common::average_entries(fields).iter().enumerate() {
            if let Ok(averages) = entry.get_document("groupAverages") {
                for (group, value) in averages {
                    if !matches!(value, bson::Bson::Double(_)) {
                        panic!(
                            "assert_averages_are_doubles! failed:\n  skillGroupAverages[{}].groupAverages.{}\n  expected a double, found: {:?}",
                            i, group, value
                        );
                    }
                }
            }
        }
    }};
}

/// Assert that a skill matrix document is two levels of sub-documents.
#[macro_export]
macro_rules! assert_two_level_matrix {
    ($matrix:expr) => {{
        let matrix: &bson::Document = &$matrix;
        for (group, skills) in matrix {
            if !matches!(skills, bson::Bson::Document(_)) {
                panic!(
                    "assert_two_level_matrix! failed: group {:?} is not a document: {:?}",
                    group, skills
                );
            }
        }
    }};
}

/// The `skillGroupAverages` entries of a persisted update, or an empty list.
pub fn average_entries(fields: &Document) -> Vec<Document> {
    fields
        .get_array("skillGroupAverages")
        .map(|entries| {
            entries
                .iter()
                .filter_map(Bson::as_document)
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}
