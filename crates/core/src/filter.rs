//! Sparse equality filter over song fields.

use serde::Deserialize;

/// A filterable song column.
///
/// Variants are listed in the order predicates are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongField {
    GroupName,
    SongName,
    ReleaseDate,
    Text,
    Link,
}

impl SongField {
    /// Column name in the `songs` table.
    pub fn column(self) -> &'static str {
        match self {
            SongField::GroupName => "group_name",
            SongField::SongName => "song_name",
            SongField::ReleaseDate => "release_date",
            SongField::Text => "text",
            SongField::Link => "link",
        }
    }
}

/// Optional exact-match constraints. `None` places no constraint on a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SongFilter {
    pub group_name: Option<String>,
    pub song_name: Option<String>,
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

impl SongFilter {
    /// Every filterable field paired with its constraint, in emission order.
    pub fn fields(&self) -> [(SongField, Option<&str>); 5] {
        [
            (SongField::GroupName, self.group_name.as_deref()),
            (SongField::SongName, self.song_name.as_deref()),
            (SongField::ReleaseDate, self.release_date.as_deref()),
            (SongField::Text, self.text.as_deref()),
            (SongField::Link, self.link.as_deref()),
        ]
    }

    /// Build a filter from wire values, treating empty strings as unset.
    ///
    /// Query strings have no way to express "match the empty string", so
    /// `?group_name=` is read as no constraint.
    pub fn from_wire(
        group_name: Option<String>,
        song_name: Option<String>,
        release_date: Option<String>,
        text: Option<String>,
        link: Option<String>,
    ) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        Self {
            group_name: non_empty(group_name),
            song_name: non_empty(song_name),
            release_date: non_empty(release_date),
            text: non_empty(text),
            link: non_empty(link),
        }
    }

    /// `true` when no field is constrained.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_none())
    }
}
