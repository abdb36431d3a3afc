use anyhow::Result;
use rusqlite::Connection;

use crate::models::{Teacher, TeacherDraft};

use super::auth::Session;
use super::connection::{open_connection, open_in_memory_connection};

/// Capability set of the record store the application delegates persistence
/// to. The roster logic and the UI depend on this trait, not on SQLite, so a
/// different backing service can be swapped in without touching either.
pub trait TeacherStore {
    /// Published profiles only, sorted ascending by order index. This is the
    /// pre-scoped input of the gallery pipeline.
    fn list_public(&self) -> Result<Vec<Teacher>>;

    /// Every profile regardless of visibility, sorted ascending by order
    /// index. Backs the admin roster manager.
    fn list_all(&self) -> Result<Vec<Teacher>>;

    fn get(&self, id: i64) -> Result<Teacher>;

    /// Create a profile. The store assigns the id, the timestamps, and an
    /// order index that appends the record at the end of the roster.
    fn insert(&mut self, draft: &TeacherDraft) -> Result<Teacher>;

    /// Rewrite every editable field of an existing profile.
    fn update(&mut self, id: i64, draft: &TeacherDraft) -> Result<Teacher>;

    /// Permanent removal; there is no soft delete.
    fn delete(&mut self, id: i64) -> Result<()>;

    /// Single independent position write, the unit of a reorder plan.
    fn set_order_index(&mut self, id: i64, order_index: i64) -> Result<()>;

    fn set_public(&mut self, id: i64, public: bool) -> Result<()>;

    /// Monotonic change marker that moves when another session commits a
    /// write. The event loop polls it and re-fetches the whole roster on any
    /// change instead of patching incrementally.
    fn revision(&self) -> Result<i64>;
}

/// The embedded SQLite backing service. Implements both `TeacherStore` and
/// `AuthProvider` over a single connection.
pub struct SqliteStore {
    pub(super) conn: Connection,
    pub(super) session: Option<Session>,
}

impl SqliteStore {
    /// Open (and lazily migrate) the on-disk database under the user's home.
    pub fn open() -> Result<Self> {
        Ok(Self {
            conn: open_connection()?,
            session: None,
        })
    }

    /// Test constructor backed by an in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: open_in_memory_connection()?,
            session: None,
        })
    }
}
