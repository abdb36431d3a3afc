//! Faculty directory manager: a public gallery of teacher profiles with an
//! authenticated admin surface for editing, publishing, and reordering them,
//! backed by an embedded SQLite store.

pub mod db;
pub mod models;
pub mod roster;
pub mod ui;
