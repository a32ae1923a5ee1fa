//! Normalizer — rebuilds a [`PlayerRecord`]'s skill fields as plain maps.
//!
//! Three independent steps, each of which may mark the record as changed:
//!
//! 1. `skillMatrix`: rebuilt group by group; groups whose value is not a
//!    document are dropped.
//! 2. `skillsHistory[*].skills`: rebuilt the same way.
//! 3. `skillGroupAverages[*].groupAverages`: every value coerced to `f64`.
//!    A value that cannot be coerced fails the whole record.
//!
//! Fields already in [`MapField::Plain`] form are left alone, so normalising
//! a normalised record reports no change.

use bson::{Bson, Document};

use crate::error::RecordError;
use crate::types::{
    GroupAverages, MapField, PlayerRecord, SkillMatrix, GROUP_AVERAGES, SKILL_GROUP_AVERAGES,
};

/// Output of [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub record: PlayerRecord,
    /// `true` if any step rebuilt a field.
    pub changed: bool,
}

/// Normalise one record. Only the three skill fields are touched.
pub fn normalize(mut record: PlayerRecord) -> Result<Normalized, RecordError> {
    let mut changed = false;

    if let Some(matrix) = record.skill_matrix.as_mut() {
        changed |= rebuild_matrix(matrix);
    }

    if let Some(history) = record.skills_history.as_mut() {
        for entry in history.iter_mut() {
            if let Some(skills) = entry.skills.as_mut() {
                changed |= rebuild_matrix(skills);
            }
        }
    }

    if let Some(averages) = record.skill_group_averages.as_mut() {
        for (index, entry) in averages.iter_mut().enumerate() {
            let Some(field) = entry.group_averages.as_mut() else {
                continue;
            };
            let MapField::Stored(Bson::Document(raw)) = field else {
                continue;
            };
            let rebuilt = coerce_averages(raw, |group| {
                format!("{SKILL_GROUP_AVERAGES}[{index}].{GROUP_AVERAGES}.{group}")
            })
            .map_err(|(path, value)| RecordError::NotNumeric {
                id: record.id.clone(),
                path,
                value,
            })?;
            *field = MapField::Plain(rebuilt);
            changed = true;
        }
    }

    Ok(Normalized { record, changed })
}

/// Rebuild a stored group → skill → score document. Returns whether the field
/// was rebuilt; non-document values are left as they are.
fn rebuild_matrix(field: &mut MapField<SkillMatrix>) -> bool {
    let MapField::Stored(Bson::Document(raw)) = field else {
        return false;
    };
    *field = MapField::Plain(plain_matrix(raw));
    true
}

fn plain_matrix(raw: &Document) -> SkillMatrix {
    raw.iter()
        .filter_map(|(group, skills)| match skills {
            Bson::Document(skills) => Some((
                group.clone(),
                skills
                    .iter()
                    .map(|(skill, score)| (skill.clone(), score.clone()))
                    .collect(),
            )),
            _ => None,
        })
        .collect()
}

fn coerce_averages(
    raw: &Document,
    path: impl Fn(&str) -> String,
) -> Result<GroupAverages, (String, Bson)> {
    raw.iter()
        .map(|(group, value)| match to_float(value) {
            Some(average) => Ok((group.clone(), average)),
            None => Err((path(group), value.clone())),
        })
        .collect()
}

/// Float conversion with the same reach as a scripting-language `float()`:
/// numbers widen, booleans become `1.0`/`0.0`, strings are parsed.
pub fn to_float(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(v) => Some(*v),
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Boolean(v) => Some(if *v { 1.0 } else { 0.0 }),
        Bson::String(s) => parse_float(s.trim()),
        _ => None,
    }
}

/// Parse a float literal, allowing single `_` separators between digits
/// (`"1_000.5"`). Leading, trailing or doubled underscores are rejected.
fn parse_float(text: &str) -> Option<f64> {
    if !text.contains('_') {
        return text.parse().ok();
    }

    let chars: Vec<char> = text.chars().collect();
    let digit_at = |i: Option<usize>| {
        i.and_then(|i| chars.get(i))
            .is_some_and(char::is_ascii_digit)
    };
    let mut cleaned = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        if c != '_' {
            cleaned.push(c);
        } else if !digit_at(i.checked_sub(1)) || !digit_at(Some(i + 1)) {
            return None;
        }
    }
    cleaned.parse().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
