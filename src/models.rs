//! Domain models that mirror the SQLite schema and get passed throughout the
//! TUI. The intent is that these types stay light-weight data holders so other
//! layers can focus on presentation and persistence logic.

use std::fmt;

/// Number of subjects shown on a gallery card before the list is cut off. The
/// detail overlay always shows the full list.
pub const CARD_SUBJECT_LIMIT: usize = 2;

#[derive(Debug, Clone)]
/// A teacher profile as stored in the directory. Optional free-text fields use
/// the empty string to mean "absent" so the struct stays a plain data holder.
pub struct Teacher {
    /// Primary key assigned by the store at creation, immutable afterwards.
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    /// Role/title shown under the name on every card.
    pub position: String,
    /// Ordered; the first entry doubles as the grouping key in the gallery.
    pub categories: Vec<String>,
    /// Ordered; cards show only the first `CARD_SUBJECT_LIMIT` entries.
    pub subjects: Vec<String>,
    pub bio: String,
    pub photo_url: String,
    pub contact_email: String,
    pub contact_phone: String,
    /// Only published profiles appear in the public gallery.
    pub public: bool,
    /// Display position within the roster; rewritten as a contiguous 0..N-1
    /// sequence after every reorder.
    pub order_index: i64,
    /// Timestamps owned by the store; never written by application logic.
    pub created_at: String,
    pub updated_at: String,
}

impl Teacher {
    /// Compose the display name from last, first, and middle name, joining
    /// only the non-empty parts with single spaces.
    pub fn full_name(&self) -> String {
        let parts = [
            self.last_name.trim(),
            self.first_name.trim(),
            self.middle_name.trim(),
        ];
        parts
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Subjects line for a gallery card, truncated to the first two entries.
    pub fn card_subjects(&self) -> String {
        self.subjects
            .iter()
            .take(CARD_SUBJECT_LIMIT)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Teacher {
    /// Write the display name to any formatter so the type plays nicely with
    /// Ratatui widgets that consume strings implicitly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

#[derive(Debug, Clone, Default)]
/// Editable profile fields, used as the payload for insert and update. The id,
/// order index, and timestamps stay under store control.
pub struct TeacherDraft {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub position: String,
    pub categories: Vec<String>,
    pub subjects: Vec<String>,
    pub bio: String,
    pub photo_url: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub public: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher(last: &str, first: &str, middle: &str) -> Teacher {
        Teacher {
            id: 1,
            last_name: last.to_string(),
            first_name: first.to_string(),
            middle_name: middle.to_string(),
            position: "Преподаватель".to_string(),
            categories: Vec::new(),
            subjects: Vec::new(),
            bio: String::new(),
            photo_url: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            public: true,
            order_index: 0,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn full_name_skips_empty_middle_name() {
        let t = teacher("Иванов", "Анна", "");
        assert_eq!(t.full_name(), "Иванов Анна");
    }

    #[test]
    fn full_name_joins_all_three_parts() {
        let t = teacher("Иванова", "Анна", "Петровна");
        assert_eq!(t.full_name(), "Иванова Анна Петровна");
    }

    #[test]
    fn full_name_trims_whitespace_padding() {
        let t = teacher(" Иванов ", "Анна", " ");
        assert_eq!(t.full_name(), "Иванов Анна");
    }

    #[test]
    fn card_subjects_truncates_to_two() {
        let mut t = teacher("Иванов", "Анна", "");
        t.subjects = vec![
            "Алгебра".to_string(),
            "Геометрия".to_string(),
            "Физика".to_string(),
        ];
        assert_eq!(t.card_subjects(), "Алгебра, Геометрия");
    }
}
