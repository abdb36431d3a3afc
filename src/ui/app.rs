use std::mem;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::db::{AuthProvider, SqliteStore, TeacherStore};
use crate::models::Teacher;
use crate::roster::{apply_plan, reorder, category_options, subject_options};

use super::forms::{
    ConfirmTeacherDelete, SignInField, SignInForm, TeacherField, TeacherForm, TEACHER_FIELDS,
};
use super::helpers::{centered_rect, surface_error, truncate_text};
use super::screens::{AdminRosterScreen, DashboardScreen, GalleryRow, GalleryScreen};

/// How long a footer status message stays visible before reverting to the key
/// hints.
const STATUS_TTL: Duration = Duration::from_secs(6);

#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Info,
    Error,
}

pub(crate) struct StatusMessage {
    pub(crate) text: String,
    pub(crate) kind: StatusKind,
    pub(crate) at: Instant,
}

/// Top-level screens. The gallery is always reachable; the dashboard and the
/// roster manager require a session.
pub(crate) enum Screen {
    Gallery,
    Dashboard(DashboardScreen),
    AdminRoster(AdminRosterScreen),
}

/// Modal overlays layered on top of the current screen. `Normal` means keys
/// go to the screen itself.
pub(crate) enum Mode {
    Normal,
    ViewingTeacher(Teacher),
    Searching(String),
    SigningIn(SignInForm),
    AddingTeacher(TeacherForm),
    EditingTeacher { id: i64, form: TeacherForm },
    ConfirmDelete(ConfirmTeacherDelete),
}

pub struct App {
    store: SqliteStore,
    gallery: GalleryScreen,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
    last_revision: i64,
    pub(crate) should_quit: bool,
}

impl App {
    pub fn new(store: SqliteStore) -> Result<Self> {
        let teachers = store.list_public()?;
        let last_revision = store.revision()?;
        Ok(Self {
            store,
            gallery: GalleryScreen::new(teachers),
            screen: Screen::Gallery,
            mode: Mode::Normal,
            status: None,
            last_revision,
            should_quit: false,
        })
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
            at: Instant::now(),
        });
    }

    fn report_error(&mut self, err: &anyhow::Error) {
        self.set_status(surface_error(err), StatusKind::Error);
    }

    /// Runs on every idle tick of the event loop: expires stale status
    /// messages and re-fetches the roster when another process has written to
    /// the database.
    pub(crate) fn on_tick(&mut self) -> Result<()> {
        if let Some(status) = &self.status {
            if status.at.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }

        let revision = self.store.revision()?;
        if revision != self.last_revision {
            self.refresh_roster_views(None)?;
        }
        Ok(())
    }

    /// Reload every roster-derived view from the store. Called after each
    /// write and whenever the revision marker moves; there is no incremental
    /// patching.
    fn refresh_roster_views(&mut self, focus: Option<i64>) -> Result<()> {
        let public = self.store.list_public()?;
        self.gallery.set_teachers(public);

        if !matches!(self.screen, Screen::Gallery) {
            let all = self.store.list_all()?;
            match &mut self.screen {
                Screen::Dashboard(dash) => {
                    let email = dash.email.clone();
                    *dash = DashboardScreen::from_roster(email, &all);
                }
                Screen::AdminRoster(screen) => screen.set_teachers(all, focus),
                Screen::Gallery => {}
            }
        }

        self.last_revision = self.store.revision()?;
        Ok(())
    }

    fn open_dashboard(&mut self) -> Result<()> {
        let email = self
            .store
            .session()
            .map(|session| session.email.clone())
            .unwrap_or_default();
        let all = self.store.list_all()?;
        self.screen = Screen::Dashboard(DashboardScreen::from_roster(email, &all));
        Ok(())
    }

    fn open_admin_roster(&mut self, focus: Option<i64>) -> Result<()> {
        let all = self.store.list_all()?;
        let mut screen = AdminRosterScreen::new(Vec::new());
        screen.set_teachers(all, focus);
        self.screen = Screen::AdminRoster(screen);
        Ok(())
    }

    /// Tag options offered by the profile form's autocomplete, drawn from the
    /// full roster rather than just the published slice.
    fn form_options(&self, field: TeacherField) -> Vec<String> {
        let teachers = match &self.screen {
            Screen::AdminRoster(screen) => &screen.teachers,
            _ => &self.gallery.teachers,
        };
        match field {
            TeacherField::Categories => category_options(teachers),
            TeacherField::Subjects => subject_options(teachers),
            _ => Vec::new(),
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let mode = mem::replace(&mut self.mode, Mode::Normal);
        match mode {
            Mode::Normal => self.handle_screen_key(key)?,
            Mode::ViewingTeacher(teacher) => self.handle_detail_key(key, teacher),
            Mode::Searching(draft) => self.handle_search_key(key, draft),
            Mode::SigningIn(form) => self.handle_sign_in_key(key, form)?,
            Mode::AddingTeacher(form) => self.handle_form_key(key, None, form)?,
            Mode::EditingTeacher { id, form } => self.handle_form_key(key, Some(id), form)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete_key(key, confirm)?,
        }
        Ok(())
    }

    fn handle_screen_key(&mut self, key: KeyEvent) -> Result<()> {
        match &self.screen {
            Screen::Gallery => self.handle_gallery_key(key)?,
            Screen::Dashboard(_) => self.handle_dashboard_key(key)?,
            Screen::AdminRoster(_) => self.handle_admin_key(key)?,
        }
        Ok(())
    }

    fn handle_gallery_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                if self.gallery.has_filters() {
                    self.gallery.set_query(None);
                    self.gallery.category = None;
                    self.gallery.subject = None;
                    self.gallery.set_teachers(self.store.list_public()?);
                    self.set_status("Filters cleared.", StatusKind::Info);
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Up => self.gallery.move_selection(-1),
            KeyCode::Down => self.gallery.move_selection(1),
            KeyCode::PageUp => self.gallery.move_selection(-8),
            KeyCode::PageDown => self.gallery.move_selection(8),
            KeyCode::Home => self.gallery.select_first(),
            KeyCode::End => self.gallery.select_last(),
            KeyCode::Enter => {
                if let Some(teacher) = self.gallery.current_teacher() {
                    self.mode = Mode::ViewingTeacher(teacher.clone());
                }
            }
            KeyCode::Char('f') | KeyCode::Char('/') => {
                let draft = self.gallery.query.clone().unwrap_or_default();
                self.mode = Mode::Searching(draft);
            }
            KeyCode::Char('c') => {
                let active = self.gallery.cycle_category();
                match active {
                    Some(category) => {
                        self.set_status(format!("Category: {category}"), StatusKind::Info)
                    }
                    None => self.set_status("Category filter off.", StatusKind::Info),
                }
            }
            KeyCode::Char('u') => {
                let active = self.gallery.cycle_subject();
                match active {
                    Some(subject) => {
                        self.set_status(format!("Subject: {subject}"), StatusKind::Info)
                    }
                    None => self.set_status("Subject filter off.", StatusKind::Info),
                }
            }
            KeyCode::Char('a') => {
                if self.store.is_admin() {
                    self.open_dashboard()?;
                } else {
                    let bootstrap = self.store.needs_bootstrap()?;
                    self.mode = Mode::SigningIn(SignInForm::new(bootstrap));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('t') | KeyCode::Enter => self.open_admin_roster(None)?,
            KeyCode::Char('o') => {
                self.store.sign_out();
                self.screen = Screen::Gallery;
                self.set_status("Signed out.", StatusKind::Info);
            }
            KeyCode::Esc | KeyCode::Char('q') => self.screen = Screen::Gallery,
            _ => {}
        }
        Ok(())
    }

    fn handle_admin_key(&mut self, key: KeyEvent) -> Result<()> {
        let grabbed = match &self.screen {
            Screen::AdminRoster(screen) => screen.grabbed,
            _ => None,
        };

        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown => {
                let offset = match key.code {
                    KeyCode::Up => -1,
                    KeyCode::Down => 1,
                    KeyCode::PageUp => -8,
                    _ => 8,
                };
                if let Screen::AdminRoster(screen) = &mut self.screen {
                    screen.move_selection(offset);
                }
            }
            KeyCode::Home => {
                if let Screen::AdminRoster(screen) = &mut self.screen {
                    screen.select_first();
                }
            }
            KeyCode::End => {
                if let Screen::AdminRoster(screen) = &mut self.screen {
                    screen.select_last();
                }
            }
            KeyCode::Char('g') => {
                if grabbed.is_some() {
                    self.drop_grabbed()?;
                } else if let Screen::AdminRoster(screen) = &mut self.screen {
                    if let Some(teacher) = screen.current_teacher() {
                        let id = teacher.id;
                        screen.grabbed = Some(id);
                        self.set_status(
                            "Move the highlight to the new position, then press g or Enter.",
                            StatusKind::Info,
                        );
                    }
                }
            }
            KeyCode::Enter => {
                if grabbed.is_some() {
                    self.drop_grabbed()?;
                } else if let Screen::AdminRoster(screen) = &self.screen {
                    if let Some(teacher) = screen.current_teacher() {
                        self.mode = Mode::ViewingTeacher(teacher.clone());
                    }
                }
            }
            KeyCode::Char('+') | KeyCode::Char('n') => {
                self.mode = Mode::AddingTeacher(TeacherForm::default());
            }
            KeyCode::Char('e') => {
                if let Screen::AdminRoster(screen) = &self.screen {
                    if let Some(teacher) = screen.current_teacher() {
                        self.mode = Mode::EditingTeacher {
                            id: teacher.id,
                            form: TeacherForm::from_teacher(teacher),
                        };
                    }
                }
            }
            KeyCode::Char('-') | KeyCode::Delete => {
                if let Screen::AdminRoster(screen) = &self.screen {
                    if let Some(teacher) = screen.current_teacher() {
                        self.mode = Mode::ConfirmDelete(ConfirmTeacherDelete::from(teacher));
                    }
                }
            }
            KeyCode::Char('p') => {
                let target = match &self.screen {
                    Screen::AdminRoster(screen) => screen
                        .current_teacher()
                        .map(|teacher| (teacher.id, teacher.public)),
                    _ => None,
                };
                if let Some((id, public)) = target {
                    match self.store.set_public(id, !public) {
                        Ok(()) => {
                            let verb = if public { "Hidden from" } else { "Published to" };
                            self.set_status(format!("{verb} the gallery."), StatusKind::Info);
                        }
                        Err(err) => self.report_error(&err),
                    }
                    self.refresh_roster_views(Some(id))?;
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                if grabbed.is_some() {
                    if let Screen::AdminRoster(screen) = &mut self.screen {
                        screen.grabbed = None;
                    }
                    self.set_status("Move cancelled.", StatusKind::Info);
                } else {
                    self.open_dashboard()?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Finish a grab gesture: plan the move from the grabbed card to the
    /// highlighted position, show the new order immediately, then persist
    /// each position independently.
    fn drop_grabbed(&mut self) -> Result<()> {
        let (teachers, source_id, target_id) = match &mut self.screen {
            Screen::AdminRoster(screen) => {
                let Some(source_id) = screen.grabbed.take() else {
                    return Ok(());
                };
                let Some(target) = screen.current_teacher() else {
                    return Ok(());
                };
                (screen.teachers.clone(), source_id, target.id)
            }
            _ => return Ok(()),
        };

        let Some((new_list, plan)) = reorder(&teachers, source_id, target_id) else {
            return Ok(());
        };

        if let Screen::AdminRoster(screen) = &mut self.screen {
            screen.set_teachers(new_list, Some(source_id));
        }

        let outcome = apply_plan(&mut self.store, &plan);
        // Re-fetch either way; after a partial failure this snaps the view
        // back to whatever order the store actually holds.
        self.refresh_roster_views(Some(source_id))?;
        match outcome {
            Ok(()) => self.set_status("Roster order saved.", StatusKind::Info),
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
        Ok(())
    }

    fn handle_detail_key(&mut self, key: KeyEvent, teacher: Teacher) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {}
            KeyCode::Char('o') => {
                if teacher.photo_url.is_empty() {
                    self.set_status("No photo link on this profile.", StatusKind::Info);
                } else if let Err(err) = open::that(&teacher.photo_url) {
                    self.set_status(
                        format!("Failed to open photo link: {err}"),
                        StatusKind::Error,
                    );
                }
                self.mode = Mode::ViewingTeacher(teacher);
            }
            _ => self.mode = Mode::ViewingTeacher(teacher),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, mut draft: String) {
        match key.code {
            KeyCode::Esc => {}
            KeyCode::Enter => {
                let query = draft.trim().to_string();
                self.gallery
                    .set_query(if query.is_empty() { None } else { Some(query) });
            }
            KeyCode::Backspace => {
                draft.pop();
                self.mode = Mode::Searching(draft);
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                draft.push(ch);
                self.mode = Mode::Searching(draft);
            }
            _ => self.mode = Mode::Searching(draft),
        }
    }

    fn handle_sign_in_key(&mut self, key: KeyEvent, mut form: SignInForm) -> Result<()> {
        match key.code {
            KeyCode::Esc => {}
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                form.toggle_field();
                self.mode = Mode::SigningIn(form);
            }
            KeyCode::Backspace => {
                form.backspace();
                self.mode = Mode::SigningIn(form);
            }
            KeyCode::Enter => {
                let Some((email, password)) = form.validate() else {
                    self.mode = Mode::SigningIn(form);
                    return Ok(());
                };
                let bootstrap = form.bootstrap;
                match self.store.sign_in(&email, &password) {
                    Ok(_) => {
                        if bootstrap {
                            self.set_status(
                                "Admin account created and signed in.",
                                StatusKind::Info,
                            );
                        } else {
                            self.set_status("Signed in.", StatusKind::Info);
                        }
                        self.open_dashboard()?;
                    }
                    Err(err) => {
                        form.error = Some(surface_error(&err));
                        self.mode = Mode::SigningIn(form);
                    }
                }
            }
            KeyCode::Char(ch) => {
                form.push_char(ch);
                self.mode = Mode::SigningIn(form);
            }
            _ => self.mode = Mode::SigningIn(form),
        }
        Ok(())
    }

    fn handle_form_key(
        &mut self,
        key: KeyEvent,
        editing: Option<i64>,
        mut form: TeacherForm,
    ) -> Result<()> {
        let restore = |form: TeacherForm, editing: Option<i64>| match editing {
            Some(id) => Mode::EditingTeacher { id, form },
            None => Mode::AddingTeacher(form),
        };

        match key.code {
            KeyCode::Esc => {
                if form.cancel_autocomplete() {
                    self.mode = restore(form, editing);
                } else {
                    self.set_status("Profile form discarded.", StatusKind::Info);
                }
            }
            KeyCode::Tab => {
                if !form.accept_suggestion() {
                    form.toggle_field();
                }
                self.mode = restore(form, editing);
            }
            KeyCode::BackTab => {
                form.toggle_field_back();
                self.mode = restore(form, editing);
            }
            KeyCode::Down => {
                form.toggle_field();
                self.mode = restore(form, editing);
            }
            KeyCode::Up => {
                form.toggle_field_back();
                self.mode = restore(form, editing);
            }
            KeyCode::Backspace => {
                form.backspace();
                let options = self.form_options(form.active);
                form.update_suggestion(&options);
                self.mode = restore(form, editing);
            }
            KeyCode::Enter => match form.parse_inputs() {
                Ok(draft) => {
                    let outcome = match editing {
                        Some(id) => self.store.update(id, &draft),
                        None => self.store.insert(&draft),
                    };
                    match outcome {
                        Ok(teacher) => {
                            let saved = if editing.is_some() {
                                format!("Updated {}.", teacher.full_name())
                            } else {
                                format!("Added {}.", teacher.full_name())
                            };
                            self.refresh_roster_views(Some(teacher.id))?;
                            self.set_status(saved, StatusKind::Info);
                        }
                        Err(err) => {
                            form.error = Some(surface_error(&err));
                            self.mode = restore(form, editing);
                        }
                    }
                }
                Err(err) => {
                    form.error = Some(surface_error(&err));
                    self.mode = restore(form, editing);
                }
            },
            KeyCode::Char(ch) => {
                if ch == ' ' && form.toggle_public() {
                    self.mode = restore(form, editing);
                    return Ok(());
                }
                form.error = None;
                if form.push_char(ch) {
                    let options = self.form_options(form.active);
                    form.update_suggestion(&options);
                }
                self.mode = restore(form, editing);
            }
            _ => self.mode = restore(form, editing),
        }
        Ok(())
    }

    fn handle_confirm_delete_key(
        &mut self,
        key: KeyEvent,
        confirm: ConfirmTeacherDelete,
    ) -> Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                match self.store.delete(confirm.id) {
                    Ok(()) => {
                        self.set_status(format!("Deleted {}.", confirm.name), StatusKind::Info)
                    }
                    Err(err) => self.report_error(&err),
                }
                self.refresh_roster_views(None)?;
            }
            KeyCode::Char('n') | KeyCode::Esc => {}
            _ => self.mode = Mode::ConfirmDelete(confirm),
        }
        Ok(())
    }

    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        let [body, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        match &self.screen {
            Screen::Gallery => self.draw_gallery(frame, body),
            Screen::Dashboard(dash) => draw_dashboard(frame, body, dash),
            Screen::AdminRoster(screen) => draw_admin_roster(frame, body, screen),
        }

        match &self.mode {
            Mode::Normal => {}
            Mode::ViewingTeacher(teacher) => draw_teacher_detail(frame, body, teacher),
            Mode::Searching(draft) => draw_search(frame, body, draft),
            Mode::SigningIn(form) => draw_sign_in(frame, body, form),
            Mode::AddingTeacher(form) => draw_teacher_form(frame, body, form, false),
            Mode::EditingTeacher { form, .. } => draw_teacher_form(frame, body, form, true),
            Mode::ConfirmDelete(confirm) => draw_confirm_delete(frame, body, confirm),
        }

        self.draw_footer(frame, footer);
    }

    fn draw_gallery(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Faculty Directory ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.gallery.teachers.is_empty() {
            let message = Paragraph::new("No published teachers yet.")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(message, inner);
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        if self.gallery.has_filters() {
            lines.push(Line::from(Span::styled(
                format!("Filters: {}", self.gallery.filter_summary()),
                Style::default().fg(Color::Cyan),
            )));
        }

        if self.gallery.rows.is_empty() {
            lines.push(Line::from(Span::styled(
                "No teachers match the current filters.",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let offset = if self.gallery.has_filters() { 1 } else { 0 };
        for (index, row) in self.gallery.rows.iter().enumerate() {
            match row {
                GalleryRow::Header(title) => lines.push(Line::from(Span::styled(
                    format!("── {title} ──"),
                    Style::default().add_modifier(Modifier::BOLD),
                ))),
                GalleryRow::Card(teacher) => {
                    let selected = index == self.gallery.selected;
                    lines.push(gallery_card_line(teacher, selected, inner.width));
                }
            }
        }

        let scroll = self.gallery.scroll.saturating_add(offset).min(
            lines.len().saturating_sub(inner.height as usize) as u16,
        );
        let paragraph = Paragraph::new(lines).scroll((scroll, 0));
        frame.render_widget(paragraph, inner);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        if let Some(status) = &self.status {
            let style = match status.kind {
                StatusKind::Info => Style::default().fg(Color::Green),
                StatusKind::Error => Style::default().fg(Color::Red),
            };
            frame.render_widget(
                Paragraph::new(status.text.clone()).style(style),
                area,
            );
            return;
        }

        let hints = match (&self.mode, &self.screen) {
            (Mode::Normal, Screen::Gallery) => {
                "↑/↓ select · Enter details · f search · c category · u subject · a admin · q quit"
            }
            (Mode::Normal, Screen::Dashboard(_)) => {
                "t manage roster · o sign out · Esc back to gallery"
            }
            (Mode::Normal, Screen::AdminRoster(_)) => {
                "↑/↓ select · n add · e edit · - delete · p publish/hide · g move · Esc back"
            }
            (Mode::ViewingTeacher(_), _) => "o open photo · Esc close",
            (Mode::Searching(_), _) => "Enter apply · Esc cancel",
            (Mode::SigningIn(_), _) => "Tab switch field · Enter sign in · Esc cancel",
            (Mode::AddingTeacher(_), _) | (Mode::EditingTeacher { .. }, _) => {
                "Tab next field / accept suggestion · Space toggle published · Enter save · Esc discard"
            }
            (Mode::ConfirmDelete(_), _) => "y delete · n keep",
        };
        frame.render_widget(
            Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }
}

fn gallery_card_line(teacher: &Teacher, selected: bool, width: u16) -> Line<'static> {
    let mut text = format!("  {} — {}", teacher.full_name(), teacher.position);
    let subjects = teacher.card_subjects();
    if !subjects.is_empty() {
        text.push_str(&format!(" · {subjects}"));
    }
    let text = truncate_text(&text, width.saturating_sub(1) as usize);
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(Span::styled(text, style))
}

fn draw_dashboard(frame: &mut Frame, area: Rect, dash: &DashboardScreen) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Admin Dashboard ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [header, stats] =
        Layout::vertical([Constraint::Length(2), Constraint::Length(5)]).areas(inner);

    frame.render_widget(
        Paragraph::new(format!("Signed in as {}", dash.email)),
        header,
    );

    let columns = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas::<3>(stats);

    let cells = [
        ("Total teachers", dash.total, Color::White),
        ("Published", dash.published, Color::Green),
        ("Hidden", dash.hidden, Color::Yellow),
    ];
    for (column, (label, value, color)) in columns.iter().zip(cells) {
        let cell = Paragraph::new(vec![
            Line::from(Span::styled(
                value.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(label),
        ])
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(cell, *column);
    }
}

fn draw_admin_roster(frame: &mut Frame, area: Rect, screen: &AdminRosterScreen) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Manage Teachers ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if screen.teachers.is_empty() {
        let message = Paragraph::new("No teachers yet. Press n to add the first profile.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(message, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (index, teacher) in screen.teachers.iter().enumerate() {
        let selected = index == screen.selected;
        let grabbed = screen.grabbed == Some(teacher.id);

        let marker = if grabbed { "◆" } else { " " };
        let visibility = if teacher.public { "" } else { " [hidden]" };
        let text = truncate_text(
            &format!(
                "{marker} {} — {}{visibility}",
                teacher.full_name(),
                teacher.position
            ),
            inner.width.saturating_sub(1) as usize,
        );

        let style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if grabbed {
            Style::default().fg(Color::Magenta)
        } else if teacher.public {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    let scroll = (screen.selected.saturating_sub(3) as u16)
        .min(lines.len().saturating_sub(inner.height as usize) as u16);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn draw_teacher_detail(frame: &mut Frame, area: Rect, teacher: &Teacher) {
    let popup = centered_rect(64, 18, area);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from(Span::styled(
            teacher.full_name(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            teacher.position.clone(),
            Style::default().fg(Color::Cyan),
        )),
        Line::default(),
    ];

    if !teacher.categories.is_empty() {
        lines.push(Line::from(format!(
            "Categories: {}",
            teacher.categories.join(", ")
        )));
    }
    if !teacher.subjects.is_empty() {
        lines.push(Line::from(format!(
            "Subjects: {}",
            teacher.subjects.join(", ")
        )));
    }
    if !teacher.bio.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(teacher.bio.clone()));
    }

    let mut contacts = Vec::new();
    if !teacher.contact_email.is_empty() {
        contacts.push(teacher.contact_email.clone());
    }
    if !teacher.contact_phone.is_empty() {
        contacts.push(teacher.contact_phone.clone());
    }
    if !contacts.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(format!("Contact: {}", contacts.join(" · "))));
    }
    if !teacher.photo_url.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Photo: {}", teacher.photo_url),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Teacher "));
    frame.render_widget(paragraph, popup);
}

fn draw_search(frame: &mut Frame, area: Rect, draft: &str) {
    let popup = centered_rect(50, 3, area);
    frame.render_widget(Clear, popup);

    let paragraph = Paragraph::new(draft.to_string())
        .block(Block::default().borders(Borders::ALL).title(" Search "));
    frame.render_widget(paragraph, popup);
    frame.set_cursor_position(Position::new(
        popup.x + 1 + draft.chars().count() as u16,
        popup.y + 1,
    ));
}

fn draw_sign_in(frame: &mut Frame, area: Rect, form: &SignInForm) {
    let popup = centered_rect(52, 12, area);
    frame.render_widget(Clear, popup);

    let field_style = |active: bool| {
        if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };
    let error_style = Style::default().fg(Color::Red);

    let mut lines = Vec::new();
    if form.bootstrap {
        lines.push(Line::from(Span::styled(
            "No admin account exists yet; this sign-in creates it.",
            Style::default().fg(Color::Cyan),
        )));
        lines.push(Line::default());
    }

    lines.push(Line::from(vec![
        Span::raw("Email: "),
        Span::styled(
            form.email.clone(),
            field_style(form.active == SignInField::Email),
        ),
    ]));
    if let Some(error) = &form.email_error {
        lines.push(Line::from(Span::styled(format!("  {error}"), error_style)));
    }

    lines.push(Line::from(vec![
        Span::raw("Password: "),
        Span::styled(
            form.masked_password(),
            field_style(form.active == SignInField::Password),
        ),
    ]));
    if let Some(error) = &form.password_error {
        lines.push(Line::from(Span::styled(format!("  {error}"), error_style)));
    }

    if let Some(error) = &form.error {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(error.clone(), error_style)));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Sign In "));
    frame.render_widget(paragraph, popup);

    let intro_rows = if form.bootstrap { 2 } else { 0 };
    let (label_len, row_offset) = match form.active {
        SignInField::Email => ("Email: ".len(), 0),
        SignInField::Password => (
            "Password: ".len(),
            1 + usize::from(form.email_error.is_some()),
        ),
    };
    frame.set_cursor_position(Position::new(
        popup.x + 1 + (label_len + form.value_len(form.active)) as u16,
        popup.y + 1 + intro_rows + row_offset as u16,
    ));
}

fn draw_teacher_form(frame: &mut Frame, area: Rect, form: &TeacherForm, editing: bool) {
    let popup = centered_rect(64, (TEACHER_FIELDS.len() + 4) as u16, area);
    frame.render_widget(Clear, popup);

    let mut lines: Vec<Line> = TEACHER_FIELDS
        .iter()
        .map(|field| form.build_line(*field))
        .collect();

    if let Some(error) = &form.error {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let title = if editing { " Edit Teacher " } else { " New Teacher " };
    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, popup);

    if form.active != TeacherField::Published {
        let label_len = form.active.label().chars().count() + 2;
        frame.set_cursor_position(Position::new(
            popup.x + 1 + (label_len + form.value_len(form.active)) as u16,
            popup.y + 1 + form.active.row(),
        ));
    }
}

fn draw_confirm_delete(frame: &mut Frame, area: Rect, confirm: &ConfirmTeacherDelete) {
    let popup = centered_rect(56, 5, area);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(format!("Delete {} permanently?", confirm.name)),
        Line::from(Span::styled(
            "This cannot be undone.",
            Style::default().fg(Color::Red),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Confirm "));
    frame.render_widget(paragraph, popup);
}
