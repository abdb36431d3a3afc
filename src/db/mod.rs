//! Persistence module split across logical submodules. The rest of the
//! codebase reaches the database only through the `TeacherStore` and
//! `AuthProvider` traits so a different backing service could be substituted
//! without touching the roster logic.

mod auth;
mod connection;
mod store;
mod teachers;

pub use auth::{AuthProvider, Session};
pub use store::{SqliteStore, TeacherStore};
