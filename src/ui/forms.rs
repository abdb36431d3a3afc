use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Teacher, TeacherDraft};

/// Enumerates the fields of the teacher profile form to drive focus
/// management and cursor placement.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum TeacherField {
    LastName,
    FirstName,
    MiddleName,
    Position,
    Categories,
    Subjects,
    Bio,
    PhotoUrl,
    Email,
    Phone,
    Published,
}

/// Form order, top to bottom. Focus cycling and the rendered rows both walk
/// this list so they can never disagree.
pub(crate) const TEACHER_FIELDS: [TeacherField; 11] = [
    TeacherField::LastName,
    TeacherField::FirstName,
    TeacherField::MiddleName,
    TeacherField::Position,
    TeacherField::Categories,
    TeacherField::Subjects,
    TeacherField::Bio,
    TeacherField::PhotoUrl,
    TeacherField::Email,
    TeacherField::Phone,
    TeacherField::Published,
];

impl TeacherField {
    pub(crate) fn label(self) -> &'static str {
        match self {
            TeacherField::LastName => "Last name",
            TeacherField::FirstName => "First name",
            TeacherField::MiddleName => "Middle name",
            TeacherField::Position => "Position",
            TeacherField::Categories => "Categories",
            TeacherField::Subjects => "Subjects",
            TeacherField::Bio => "Bio",
            TeacherField::PhotoUrl => "Photo URL",
            TeacherField::Email => "Email",
            TeacherField::Phone => "Phone",
            TeacherField::Published => "Published",
        }
    }

    /// Row index of the field inside the form modal.
    pub(crate) fn row(self) -> u16 {
        TEACHER_FIELDS
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0) as u16
    }

    fn is_required(self) -> bool {
        matches!(
            self,
            TeacherField::LastName | TeacherField::FirstName | TeacherField::Position
        )
    }

    /// Categories and subjects take comma-separated lists and get prefix
    /// autocomplete against the existing option lists.
    pub(crate) fn is_tag_list(self) -> bool {
        matches!(self, TeacherField::Categories | TeacherField::Subjects)
    }
}

/// Form state for creating or editing a teacher profile, including the tag
/// autocomplete tracking for the category/subject fields.
#[derive(Clone)]
pub(crate) struct TeacherForm {
    pub(crate) last_name: String,
    pub(crate) first_name: String,
    pub(crate) middle_name: String,
    pub(crate) position: String,
    pub(crate) categories: String,
    pub(crate) subjects: String,
    pub(crate) bio: String,
    pub(crate) photo_url: String,
    pub(crate) contact_email: String,
    pub(crate) contact_phone: String,
    pub(crate) public: bool,
    pub(crate) active: TeacherField,
    pub(crate) error: Option<String>,
    pub(crate) suggestion: Option<String>,
    pub(crate) autocomplete_disabled: bool,
}

impl Default for TeacherForm {
    fn default() -> Self {
        Self {
            last_name: String::new(),
            first_name: String::new(),
            middle_name: String::new(),
            position: String::new(),
            categories: String::new(),
            subjects: String::new(),
            bio: String::new(),
            photo_url: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            // New profiles publish by default.
            public: true,
            active: TeacherField::LastName,
            error: None,
            suggestion: None,
            autocomplete_disabled: false,
        }
    }
}

impl TeacherForm {
    /// Populate the form from an existing profile when entering edit mode.
    pub(crate) fn from_teacher(teacher: &Teacher) -> Self {
        Self {
            last_name: teacher.last_name.clone(),
            first_name: teacher.first_name.clone(),
            middle_name: teacher.middle_name.clone(),
            position: teacher.position.clone(),
            categories: teacher.categories.join(", "),
            subjects: teacher.subjects.join(", "),
            bio: teacher.bio.clone(),
            photo_url: teacher.photo_url.clone(),
            contact_email: teacher.contact_email.clone(),
            contact_phone: teacher.contact_phone.clone(),
            public: teacher.public,
            active: TeacherField::LastName,
            error: None,
            suggestion: None,
            autocomplete_disabled: false,
        }
    }

    /// Cycle focus to the next field.
    pub(crate) fn toggle_field(&mut self) {
        self.shift_focus(1);
    }

    /// Cycle focus to the previous field.
    pub(crate) fn toggle_field_back(&mut self) {
        self.shift_focus(-1);
    }

    fn shift_focus(&mut self, offset: isize) {
        let len = TEACHER_FIELDS.len() as isize;
        let current = self.active.row() as isize;
        let next = (current + offset).rem_euclid(len) as usize;
        self.active = TEACHER_FIELDS[next];
        if !self.active.is_tag_list() {
            self.clear_suggestion();
        }
    }

    /// Insert a character into the active field. The published flag has no
    /// text to edit, so characters aimed at it are rejected.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() || self.active == TeacherField::Published {
            return false;
        }
        if self.active.is_tag_list() {
            self.autocomplete_disabled = false;
        }
        if let Some(value) = self.value_mut(self.active) {
            value.push(ch);
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        if self.active.is_tag_list() {
            self.autocomplete_disabled = false;
        }
        if let Some(value) = self.value_mut(self.active) {
            value.pop();
        }
    }

    /// Flip the published flag; only meaningful while that field has focus.
    pub(crate) fn toggle_public(&mut self) -> bool {
        if self.active == TeacherField::Published {
            self.public = !self.public;
            true
        } else {
            false
        }
    }

    /// Validate and normalize form inputs into a store-ready draft.
    pub(crate) fn parse_inputs(&self) -> Result<TeacherDraft> {
        let last_name = self.last_name.trim();
        if last_name.is_empty() {
            return Err(anyhow!("Last name is required."));
        }
        let first_name = self.first_name.trim();
        if first_name.is_empty() {
            return Err(anyhow!("First name is required."));
        }
        let position = self.position.trim();
        if position.is_empty() {
            return Err(anyhow!("Position is required."));
        }
        let contact_email = self.contact_email.trim();
        if !contact_email.is_empty() && !is_valid_email(contact_email) {
            return Err(anyhow!("Contact email is not a valid address."));
        }

        Ok(TeacherDraft {
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            middle_name: self.middle_name.trim().to_string(),
            position: position.to_string(),
            categories: split_tags(&self.categories),
            subjects: split_tags(&self.subjects),
            bio: self.bio.trim().to_string(),
            photo_url: self.photo_url.trim().to_string(),
            contact_email: contact_email.to_string(),
            contact_phone: self.contact_phone.trim().to_string(),
            public: self.public,
        })
    }

    /// Update the tag autocomplete suggestion for the segment after the last
    /// comma in the active category/subject field.
    pub(crate) fn update_suggestion(&mut self, options: &[String]) {
        if !self.active.is_tag_list() {
            self.clear_suggestion();
            return;
        }

        let segment = self.current_segment().to_string();
        if self.autocomplete_disabled || segment.chars().count() < 2 {
            self.clear_suggestion();
            return;
        }

        let segment_lower = segment.to_lowercase();
        let maybe_match = options
            .iter()
            .find(|candidate| candidate.to_lowercase().starts_with(&segment_lower));

        match maybe_match {
            Some(candidate) if candidate.to_lowercase() != segment_lower => {
                self.suggestion = Some(candidate.clone());
            }
            _ => self.suggestion = None,
        }
    }

    /// Apply the suggested tag, replacing the in-progress segment.
    pub(crate) fn accept_suggestion(&mut self) -> bool {
        let candidate = match (self.suggestion_suffix().is_some(), self.suggestion.clone()) {
            (true, Some(candidate)) => candidate,
            _ => return false,
        };

        let active = self.active;
        if let Some(value) = self.value_mut(active) {
            match value.rfind(',') {
                Some(pos) => {
                    value.truncate(pos + 1);
                    value.push(' ');
                }
                None => value.clear(),
            }
            value.push_str(&candidate);
        }
        self.autocomplete_disabled = true;
        self.suggestion = None;
        true
    }

    /// Explicitly dismiss the suggestion for the rest of this interaction.
    pub(crate) fn cancel_autocomplete(&mut self) -> bool {
        if self.active.is_tag_list() && self.suggestion.is_some() {
            self.autocomplete_disabled = true;
            self.suggestion = None;
            return true;
        }
        false
    }

    pub(crate) fn has_active_suggestion(&self) -> bool {
        self.active.is_tag_list() && self.suggestion.is_some()
    }

    /// Remaining characters to display as a ghosted autocomplete hint.
    pub(crate) fn suggestion_suffix(&self) -> Option<String> {
        let candidate = self.suggestion.as_ref()?;
        let typed = self.current_segment().chars().count();
        let suffix: String = candidate.chars().skip(typed).collect();
        if suffix.is_empty() {
            None
        } else {
            Some(suffix)
        }
    }

    fn clear_suggestion(&mut self) {
        self.suggestion = None;
    }

    /// The tag currently being typed: everything after the last comma.
    fn current_segment(&self) -> &str {
        let value = match self.active {
            TeacherField::Categories => &self.categories,
            TeacherField::Subjects => &self.subjects,
            _ => return "",
        };
        match value.rfind(',') {
            Some(pos) => value[pos + 1..].trim_start(),
            None => value.trim_start(),
        }
    }

    fn value(&self, field: TeacherField) -> Option<&String> {
        match field {
            TeacherField::LastName => Some(&self.last_name),
            TeacherField::FirstName => Some(&self.first_name),
            TeacherField::MiddleName => Some(&self.middle_name),
            TeacherField::Position => Some(&self.position),
            TeacherField::Categories => Some(&self.categories),
            TeacherField::Subjects => Some(&self.subjects),
            TeacherField::Bio => Some(&self.bio),
            TeacherField::PhotoUrl => Some(&self.photo_url),
            TeacherField::Email => Some(&self.contact_email),
            TeacherField::Phone => Some(&self.contact_phone),
            TeacherField::Published => None,
        }
    }

    fn value_mut(&mut self, field: TeacherField) -> Option<&mut String> {
        match field {
            TeacherField::LastName => Some(&mut self.last_name),
            TeacherField::FirstName => Some(&mut self.first_name),
            TeacherField::MiddleName => Some(&mut self.middle_name),
            TeacherField::Position => Some(&mut self.position),
            TeacherField::Categories => Some(&mut self.categories),
            TeacherField::Subjects => Some(&mut self.subjects),
            TeacherField::Bio => Some(&mut self.bio),
            TeacherField::PhotoUrl => Some(&mut self.photo_url),
            TeacherField::Email => Some(&mut self.contact_email),
            TeacherField::Phone => Some(&mut self.contact_phone),
            TeacherField::Published => None,
        }
    }

    /// Render a styled line for the modal form, optionally appending the
    /// autocomplete suffix on the tag fields.
    pub(crate) fn build_line(&self, field: TeacherField) -> Line<'static> {
        let is_active = self.active == field;
        let label = field.label();

        if field == TeacherField::Published {
            let marker = if self.public {
                "[x] visible in the gallery"
            } else {
                "[ ] hidden from the gallery"
            };
            let style = if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            return Line::from(vec![
                Span::raw(format!("{label}: ")),
                Span::styled(marker.to_string(), style),
            ]);
        }

        let value = self.value(field).cloned().unwrap_or_default();
        let placeholder = if field.is_required() {
            "<required>"
        } else {
            "<optional>"
        };
        let display = if value.is_empty() {
            placeholder.to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let mut spans = vec![Span::raw(format!("{label}: "))];
        spans.push(Span::styled(display, style));
        if field.is_tag_list() && is_active {
            if let Some(suffix) = self.suggestion_suffix() {
                spans.push(Span::styled(suffix, Style::default().fg(Color::DarkGray)));
            }
        }

        Line::from(spans)
    }

    /// Character length of the requested field, used for cursor placement.
    pub(crate) fn value_len(&self, field: TeacherField) -> usize {
        self.value(field)
            .map(|value| value.chars().count())
            .unwrap_or(0)
    }
}

/// Split a comma-separated tag field into an ordered, deduplicated list.
/// Insertion order is preserved because the first category doubles as the
/// grouping key.
pub(crate) fn split_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let tag = raw.trim();
        if tag.is_empty() || tags.iter().any(|existing| existing == tag) {
            continue;
        }
        tags.push(tag.to_string());
    }
    tags
}

/// Minimal shape check for an email address; enough to catch the typos the
/// sign-in and contact fields care about.
pub(crate) fn is_valid_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Fields of the sign-in form.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum SignInField {
    Email,
    Password,
}

/// State for the email/password sign-in modal, with per-field inline errors.
pub(crate) struct SignInForm {
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) active: SignInField,
    pub(crate) email_error: Option<String>,
    pub(crate) password_error: Option<String>,
    pub(crate) error: Option<String>,
    /// True while no admin account exists; the modal explains that the first
    /// sign-in registers the credentials.
    pub(crate) bootstrap: bool,
}

impl SignInForm {
    pub(crate) fn new(bootstrap: bool) -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            active: SignInField::Email,
            email_error: None,
            password_error: None,
            error: None,
            bootstrap,
        }
    }

    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            SignInField::Email => SignInField::Password,
            SignInField::Password => SignInField::Email,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            SignInField::Email => self.email.push(ch),
            SignInField::Password => self.password.push(ch),
        }
        self.error = None;
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            SignInField::Email => {
                self.email.pop();
            }
            SignInField::Password => {
                self.password.pop();
            }
        }
    }

    /// Check both fields, recording inline errors next to the offending field.
    /// Returns the cleaned credentials only when both pass; the sign-in
    /// request is not attempted otherwise.
    pub(crate) fn validate(&mut self) -> Option<(String, String)> {
        self.email_error = None;
        self.password_error = None;

        let email = self.email.trim().to_string();
        if !is_valid_email(&email) {
            self.email_error = Some("Enter a valid email address.".to_string());
        }
        if self.password.chars().count() < 6 {
            self.password_error = Some("Password must be at least 6 characters.".to_string());
        }

        if self.email_error.is_none() && self.password_error.is_none() {
            Some((email, self.password.clone()))
        } else {
            None
        }
    }

    /// Password rendered as asterisks.
    pub(crate) fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }

    pub(crate) fn value_len(&self, field: SignInField) -> usize {
        match field {
            SignInField::Email => self.email.chars().count(),
            SignInField::Password => self.password.chars().count(),
        }
    }
}

/// State for confirming a permanent profile deletion.
pub(crate) struct ConfirmTeacherDelete {
    pub(crate) id: i64,
    pub(crate) name: String,
}

impl ConfirmTeacherDelete {
    pub(crate) fn from(teacher: &Teacher) -> Self {
        Self {
            id: teacher.id,
            name: teacher.full_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_tags_trims_dedupes_and_keeps_order() {
        let tags = split_tags("Математика, Физика, , Математика");
        assert_eq!(tags, ["Математика", "Физика"]);
    }

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("admin@school.ru"));
        assert!(!is_valid_email("admin"));
        assert!(!is_valid_email("admin@school"));
        assert!(!is_valid_email("admin @school.ru"));
    }

    #[test]
    fn parse_requires_name_and_position() {
        let mut form = TeacherForm::default();
        assert!(form.parse_inputs().is_err());
        form.last_name = "Иванов".to_string();
        form.first_name = "Анна".to_string();
        assert!(form.parse_inputs().is_err());
        form.position = "Директор".to_string();
        assert!(form.parse_inputs().is_ok());
    }

    #[test]
    fn parse_rejects_malformed_contact_email() {
        let mut form = TeacherForm::default();
        form.last_name = "Иванов".to_string();
        form.first_name = "Анна".to_string();
        form.position = "Директор".to_string();
        form.contact_email = "not-an-email".to_string();
        assert!(form.parse_inputs().is_err());
    }

    #[test]
    fn tag_autocomplete_completes_current_segment() {
        let mut form = TeacherForm::default();
        form.active = TeacherField::Categories;
        form.categories = "Физика, Мат".to_string();
        form.update_suggestion(&["Математика".to_string(), "Физика".to_string()]);
        assert_eq!(form.suggestion_suffix().as_deref(), Some("ематика"));
        assert!(form.accept_suggestion());
        assert_eq!(form.categories, "Физика, Математика");
    }

    #[test]
    fn sign_in_validation_sets_inline_errors() {
        let mut form = SignInForm::new(false);
        form.email = "nope".to_string();
        form.password = "123".to_string();
        assert!(form.validate().is_none());
        assert!(form.email_error.is_some());
        assert!(form.password_error.is_some());

        form.email = "admin@school.ru".to_string();
        form.password = "secret1".to_string();
        let creds = form.validate().unwrap();
        assert_eq!(creds.0, "admin@school.ru");
        assert!(form.email_error.is_none());
    }
}
