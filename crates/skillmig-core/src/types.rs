//! Record model for skillmig-core.
//!
//! A [`PlayerRecord`] is the slice of a player document the migration cares
//! about: its identifier, a display name for logging, and the three
//! skill-shaped fields. Everything else in the stored document is never read
//! back and never written.

use std::collections::BTreeMap;

use bson::{Bson, Document};

use crate::error::RecordError;

pub const ID: &str = "_id";
pub const FIRST_NAME: &str = "firstName";
pub const SUR_NAME: &str = "surName";
pub const SKILL_MATRIX: &str = "skillMatrix";
pub const SKILLS_HISTORY: &str = "skillsHistory";
pub const SKILL_GROUP_AVERAGES: &str = "skillGroupAverages";
pub const HISTORY_SKILLS: &str = "skills";
pub const GROUP_AVERAGES: &str = "groupAverages";

/// Skill name → score. Scores are carried verbatim, whatever their BSON type.
pub type SkillScores = BTreeMap<String, Bson>;

/// Group name → skill scores.
pub type SkillMatrix = BTreeMap<String, SkillScores>;

/// Group name → average score.
pub type GroupAverages = BTreeMap<String, f64>;

/// A map-shaped field, either as read from the store or rebuilt as a plain map.
#[derive(Debug, Clone, PartialEq)]
pub enum MapField<T> {
    /// Exactly as decoded from the store. The shape has not been checked.
    Stored(Bson),
    /// Rebuilt by the normalizer.
    Plain(T),
}

impl<T> MapField<T> {
    pub fn is_plain(&self) -> bool {
        matches!(self, MapField::Plain(_))
    }

    pub fn as_plain(&self) -> Option<&T> {
        match self {
            MapField::Plain(value) => Some(value),
            MapField::Stored(_) => None,
        }
    }
}

/// One element of `skillsHistory`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// The entry's sub-document. Keys other than `skills` pass through as-is.
    pub doc: Document,
    pub skills: Option<MapField<SkillMatrix>>,
}

/// One element of `skillGroupAverages`.
#[derive(Debug, Clone, PartialEq)]
pub struct AverageEntry {
    /// The entry's sub-document. Keys other than `groupAverages` pass through as-is.
    pub doc: Document,
    pub group_averages: Option<MapField<GroupAverages>>,
}

/// A player document decoded for migration.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    /// Opaque store identifier (`_id`).
    pub id: Bson,
    /// `firstName surName`, when the document has them. Only used in logs.
    pub name: Option<String>,
    pub skill_matrix: Option<MapField<SkillMatrix>>,
    pub skills_history: Option<Vec<HistoryEntry>>,
    pub skill_group_averages: Option<Vec<AverageEntry>>,
}

impl PlayerRecord {
    /// Decode the migratable fields of a stored player document.
    ///
    /// Map-shaped fields are kept as [`MapField::Stored`]; their shape is
    /// only inspected by the normalizer. The two sequence fields must be
    /// arrays of sub-documents when present. `null` counts as absent.
    pub fn from_document(doc: &Document) -> Result<Self, RecordError> {
        let id = doc.get(ID).cloned().ok_or(RecordError::MissingId)?;

        let skills_history = decode_entries(&id, doc, SKILLS_HISTORY, |entry| HistoryEntry {
            skills: entry.get(HISTORY_SKILLS).cloned().map(MapField::Stored),
            doc: entry,
        })?;
        let skill_group_averages =
            decode_entries(&id, doc, SKILL_GROUP_AVERAGES, |entry| AverageEntry {
                group_averages: entry.get(GROUP_AVERAGES).cloned().map(MapField::Stored),
                doc: entry,
            })?;

        Ok(Self {
            name: display_name(doc),
            skill_matrix: doc.get(SKILL_MATRIX).cloned().map(MapField::Stored),
            skills_history,
            skill_group_averages,
            id,
        })
    }

    /// Label used in log lines: the player's name if known, else the id.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.id.to_string(),
        }
    }

    /// The partial update written back for this record.
    ///
    /// Always holds `skillMatrix`, `skillsHistory` and `skillGroupAverages`.
    /// A field the record does not have is written as `null`, which
    /// [`PlayerRecord::from_document`] reads back as absent.
    pub fn persisted_fields(&self) -> Document {
        let matrix = self
            .skill_matrix
            .as_ref()
            .map_or(Bson::Null, |matrix| encode_field(matrix, encode_matrix));
        let history = self.skills_history.as_ref().map_or(Bson::Null, |history| {
            let entries = history
                .iter()
                .map(|entry| {
                    let mut doc = entry.doc.clone();
                    if let Some(skills) = &entry.skills {
                        doc.insert(HISTORY_SKILLS, encode_field(skills, encode_matrix));
                    }
                    Bson::Document(doc)
                })
                .collect();
            Bson::Array(entries)
        });
        let averages = self.skill_group_averages.as_ref().map_or(Bson::Null, |averages| {
            let entries = averages
                .iter()
                .map(|entry| {
                    let mut doc = entry.doc.clone();
                    if let Some(group_averages) = &entry.group_averages {
                        doc.insert(GROUP_AVERAGES, encode_field(group_averages, encode_averages));
                    }
                    Bson::Document(doc)
                })
                .collect();
            Bson::Array(entries)
        });

        let mut fields = Document::new();
        fields.insert(SKILL_MATRIX, matrix);
        fields.insert(SKILLS_HISTORY, history);
        fields.insert(SKILL_GROUP_AVERAGES, averages);
        fields
    }
}

fn display_name(doc: &Document) -> Option<String> {
    let first = doc.get_str(FIRST_NAME).ok();
    let last = doc.get_str(SUR_NAME).ok();
    match (first, last) {
        (Some(first), Some(last)) => Some(format!("{first} {last}")),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}

fn decode_entries<T>(
    id: &Bson,
    doc: &Document,
    field: &'static str,
    build: impl Fn(Document) -> T,
) -> Result<Option<Vec<T>>, RecordError> {
    let items = match doc.get(field) {
        None | Some(Bson::Null) => return Ok(None),
        Some(Bson::Array(items)) => items,
        Some(other) => {
            return Err(RecordError::NotAnArray {
                id: id.clone(),
                field,
                value: other.clone(),
            })
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Bson::Document(entry) => Ok(build(entry.clone())),
            other => Err(RecordError::NotADocument {
                id: id.clone(),
                field,
                index,
                value: other.clone(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn encode_field<T>(field: &MapField<T>, encode: impl Fn(&T) -> Document) -> Bson {
    match field {
        MapField::Stored(raw) => raw.clone(),
        MapField::Plain(value) => Bson::Document(encode(value)),
    }
}

fn encode_matrix(matrix: &SkillMatrix) -> Document {
    matrix
        .iter()
        .map(|(group, scores)| {
            let scores: Document = scores
                .iter()
                .map(|(skill, score)| (skill.clone(), score.clone()))
                .collect();
            (group.clone(), Bson::Document(scores))
        })
        .collect()
}

fn encode_averages(averages: &GroupAverages) -> Document {
    averages
        .iter()
        .map(|(group, average)| (group.clone(), Bson::Double(*average)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
