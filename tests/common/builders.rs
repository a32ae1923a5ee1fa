//! Test builders — ergonomic constructors for player documents.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use bson::{doc, Bson, Document};

// ---------------------------------------------------------------------------
// PlayerDocBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for stored player documents.
///
/// # Example
///
/// ```rust
/// let doc = PlayerDocBuilder::new(1)
///     .name("Carolina", "Marin")
///     .skill_matrix(doc! { "footwork": { "lunge": 3 } })
///     .average_entry("2024-03-01", doc! { "footwork": 3 })
///     .build();
/// ```
pub struct PlayerDocBuilder {
    doc: Document,
    history: Option<Vec<Bson>>,
    averages: Option<Vec<Bson>>,
}

impl PlayerDocBuilder {
    pub fn new(id: impl Into<Bson>) -> Self {
        Self {
            doc: doc! { "_id": id.into() },
            history: None,
            averages: None,
        }
    }

    pub fn name(mut self, first: &str, last: &str) -> Self {
        self.doc.insert("firstName", first);
        self.doc.insert("surName", last);
        self
    }

    /// Any other top-level key, e.g. `level` or `clubId`.
    pub fn field(mut self, key: &str, value: impl Into<Bson>) -> Self {
        self.doc.insert(key, value.into());
        self
    }

    pub fn skill_matrix(self, matrix: impl Into<Bson>) -> Self {
        self.field("skillMatrix", matrix)
    }

    /// Append a `skillsHistory` entry with the given `skills` value.
    pub fn history_entry(mut self, date: &str, skills: impl Into<Bson>) -> Self {
        self.history.get_or_insert_with(Vec::new).push(Bson::Document(doc! {
            "updatedBy": "coach",
            "date": date,
            "skills": skills.into(),
        }));
        self
    }

    /// Append a `skillGroupAverages` entry with the given `groupAverages` value.
    pub fn average_entry(mut self, date: &str, averages: impl Into<Bson>) -> Self {
        self.averages.get_or_insert_with(Vec::new).push(Bson::Document(doc! {
            "date": date,
            "groupAverages": averages.into(),
        }));
        self
    }

    pub fn build(mut self) -> Document {
        if let Some(history) = self.history {
            self.doc.insert("skillsHistory", history);
        }
        if let Some(averages) = self.averages {
            self.doc.insert("skillGroupAverages", averages);
        }
        self.doc
    }
}

// ---------------------------------------------------------------------------
// Corpus helpers
// ---------------------------------------------------------------------------

/// `n` players, each with one skill group and one average entry, ids `0..n`.
pub fn build_roster(n: i32) -> Vec<Document> {
    (0..n)
        .map(|i| {
            PlayerDocBuilder::new(i)
                .name("Player", &i.to_string())
                .skill_matrix(doc! { "footwork": { "lunge": i } })
                .average_entry("2024-01-01", doc! { "footwork": i })
                .build()
        })
        .collect()
}
