use std::cmp::min;

use crate::models::Teacher;
use crate::roster::{category_options, compute_view, subject_options};

/// One renderable row of the public gallery: either a category heading or a
/// teacher card. Keeping headings in the row list means scrolling and
/// selection share a single index space.
pub(crate) enum GalleryRow {
    Header(String),
    Card(Teacher),
}

/// Backing state for the public gallery screen. Holds the published roster
/// plus the active search/filter state, and derives the grouped row list from
/// them whenever either changes.
pub(crate) struct GalleryScreen {
    pub(crate) teachers: Vec<Teacher>,
    pub(crate) query: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) subject: Option<String>,
    pub(crate) category_options: Vec<String>,
    pub(crate) subject_options: Vec<String>,
    pub(crate) rows: Vec<GalleryRow>,
    pub(crate) selected: usize,
    pub(crate) scroll: u16,
}

impl GalleryScreen {
    pub(crate) fn new(teachers: Vec<Teacher>) -> Self {
        let mut screen = Self {
            teachers,
            query: None,
            category: None,
            subject: None,
            category_options: Vec::new(),
            subject_options: Vec::new(),
            rows: Vec::new(),
            selected: 0,
            scroll: 0,
        };
        screen.rebuild();
        screen
    }

    /// Replace the roster wholesale after a store round-trip and recompute
    /// everything derived from it.
    pub(crate) fn set_teachers(&mut self, teachers: Vec<Teacher>) {
        self.teachers = teachers;
        self.rebuild();
    }

    pub(crate) fn set_query(&mut self, query: Option<String>) {
        self.query = query;
        self.rebuild();
    }

    /// Advance the category filter: all -> first option -> ... -> all.
    /// Returns the newly active option for the status line.
    pub(crate) fn cycle_category(&mut self) -> Option<String> {
        self.category = next_option(&self.category_options, self.category.take());
        self.rebuild();
        self.category.clone()
    }

    pub(crate) fn cycle_subject(&mut self) -> Option<String> {
        self.subject = next_option(&self.subject_options, self.subject.take());
        self.rebuild();
        self.subject.clone()
    }

    pub(crate) fn has_filters(&self) -> bool {
        self.query.as_ref().map(|q| !q.trim().is_empty()).unwrap_or(false)
            || self.category.is_some()
            || self.subject.is_some()
    }

    /// Short description of the active filters for the gallery header.
    pub(crate) fn filter_summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(query) = &self.query {
            if !query.trim().is_empty() {
                parts.push(format!("search \"{}\"", query.trim()));
            }
        }
        if let Some(category) = &self.category {
            parts.push(format!("category {category}"));
        }
        if let Some(subject) = &self.subject {
            parts.push(format!("subject {subject}"));
        }
        parts.join(" / ")
    }

    pub(crate) fn current_teacher(&self) -> Option<&Teacher> {
        match self.rows.get(self.selected) {
            Some(GalleryRow::Card(teacher)) => Some(teacher),
            _ => None,
        }
    }

    /// Move the selection across card rows, stepping over headings.
    pub(crate) fn move_selection(&mut self, offset: isize) {
        let cards = self.card_positions();
        if cards.is_empty() {
            return;
        }
        let current = cards
            .iter()
            .position(|&row| row >= self.selected)
            .unwrap_or(cards.len() - 1);
        let len = cards.len() as isize;
        let mut target = current as isize + offset;
        if target < 0 {
            target = 0;
        }
        if target >= len {
            target = len - 1;
        }
        self.selected = cards[target as usize];
        self.update_scroll();
    }

    pub(crate) fn select_first(&mut self) {
        if let Some(&row) = self.card_positions().first() {
            self.selected = row;
            self.update_scroll();
        }
    }

    pub(crate) fn select_last(&mut self) {
        if let Some(&row) = self.card_positions().last() {
            self.selected = row;
            self.update_scroll();
        }
    }

    fn card_positions(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(index, row)| match row {
                GalleryRow::Card(_) => Some(index),
                GalleryRow::Header(_) => None,
            })
            .collect()
    }

    fn rebuild(&mut self) {
        self.category_options = category_options(&self.teachers);
        self.subject_options = subject_options(&self.teachers);

        // Options shrink when records disappear; drop filters that no longer
        // correspond to anything rather than filtering everything out.
        if let Some(category) = &self.category {
            if !self.category_options.contains(category) {
                self.category = None;
            }
        }
        if let Some(subject) = &self.subject {
            if !self.subject_options.contains(subject) {
                self.subject = None;
            }
        }

        let query = self.query.clone().unwrap_or_default();
        let groups = compute_view(
            &self.teachers,
            &query,
            self.category.as_deref(),
            self.subject.as_deref(),
        );

        self.rows.clear();
        for group in groups {
            self.rows.push(GalleryRow::Header(group.title));
            for teacher in group.teachers {
                self.rows.push(GalleryRow::Card(teacher));
            }
        }

        // Snap the selection to the nearest card row.
        let cards = self.card_positions();
        if let Some(&row) = cards
            .iter()
            .find(|&&row| row >= self.selected)
            .or_else(|| cards.last())
        {
            self.selected = row;
        } else {
            self.selected = 0;
        }
        self.update_scroll();
    }

    fn update_scroll(&mut self) {
        if self.rows.is_empty() {
            self.scroll = 0;
            return;
        }
        let desired = self.selected.saturating_sub(3) as u16;
        let max_scroll = self.rows.len().saturating_sub(1) as u16;
        self.scroll = min(desired, max_scroll);
    }
}

fn next_option(options: &[String], current: Option<String>) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    match current {
        None => Some(options[0].clone()),
        Some(active) => {
            let index = options.iter().position(|option| *option == active)?;
            options.get(index + 1).cloned()
        }
    }
}

/// Backing state for the admin roster manager, including the in-flight
/// grab-and-drop gesture.
pub(crate) struct AdminRosterScreen {
    pub(crate) teachers: Vec<Teacher>,
    pub(crate) selected: usize,
    /// Id of the card currently being moved; `None` outside a move gesture.
    pub(crate) grabbed: Option<i64>,
}

impl AdminRosterScreen {
    pub(crate) fn new(teachers: Vec<Teacher>) -> Self {
        Self {
            teachers,
            selected: 0,
            grabbed: None,
        }
    }

    /// Replace the roster after a store round-trip, keeping the selection on
    /// the requested record where possible.
    pub(crate) fn set_teachers(&mut self, teachers: Vec<Teacher>, focus_id: Option<i64>) {
        self.teachers = teachers;
        if let Some(id) = focus_id {
            if let Some(index) = self.teachers.iter().position(|t| t.id == id) {
                self.selected = index;
            }
        }
        if self.teachers.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.teachers.len() {
            self.selected = self.teachers.len() - 1;
        }
        if let Some(id) = self.grabbed {
            if !self.teachers.iter().any(|t| t.id == id) {
                self.grabbed = None;
            }
        }
    }

    pub(crate) fn current_teacher(&self) -> Option<&Teacher> {
        self.teachers.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.teachers.is_empty() {
            return;
        }
        let len = self.teachers.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        if !self.teachers.is_empty() {
            self.selected = 0;
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.teachers.is_empty() {
            self.selected = self.teachers.len() - 1;
        }
    }
}

/// Roster statistics shown on the admin dashboard.
pub(crate) struct DashboardScreen {
    pub(crate) email: String,
    pub(crate) total: usize,
    pub(crate) published: usize,
    pub(crate) hidden: usize,
}

impl DashboardScreen {
    pub(crate) fn from_roster(email: String, teachers: &[Teacher]) -> Self {
        let published = teachers.iter().filter(|t| t.public).count();
        Self {
            email,
            total: teachers.len(),
            published,
            hidden: teachers.len() - published,
        }
    }
}
