use anyhow::{anyhow, Context, Result};
use rusqlite::params;
use sha2::{Digest, Sha256};

use super::store::SqliteStore;

/// Application-level salt mixed into every password digest. The store holds a
/// single local admin credential, not a multi-tenant user table.
const PASSWORD_SALT: &[u8] = b"faculty-directory-manager.v1";

/// The signed-in admin. Holding a session is what unlocks the admin surface;
/// the roster logic itself never depends on identity.
#[derive(Debug, Clone)]
pub struct Session {
    pub email: String,
}

/// Capability set of the authentication service. Like `TeacherStore`, the UI
/// depends on this trait rather than on the SQLite implementation.
pub trait AuthProvider {
    /// Verify credentials and establish a session. While no admin account
    /// exists yet, the first sign-in registers its credentials as the admin.
    fn sign_in(&mut self, email: &str, password: &str) -> Result<Session>;

    fn sign_out(&mut self);

    fn session(&self) -> Option<&Session>;

    /// Whether the current session may reach the admin surface. The single
    /// local account is always an admin.
    fn is_admin(&self) -> bool {
        self.session().is_some()
    }

    /// True until the first admin account has been registered; the sign-in
    /// screen uses this to explain the bootstrap behavior.
    fn needs_bootstrap(&self) -> Result<bool>;
}

impl AuthProvider for SqliteStore {
    fn sign_in(&mut self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim().to_lowercase();
        let hash = hash_password(password);

        if admin_count(&self.conn)? == 0 {
            self.conn
                .execute(
                    "INSERT INTO admins (email, password_hash) VALUES (?1, ?2)",
                    params![email, hash],
                )
                .context("failed to register admin account")?;
        } else {
            let stored: Option<String> = self
                .conn
                .query_row(
                    "SELECT password_hash FROM admins WHERE email = ?1",
                    params![email],
                    |row| row.get(0),
                )
                .ok();

            match stored {
                Some(stored) if stored == hash => {}
                _ => return Err(anyhow!("Invalid email or password.")),
            }
        }

        let session = Session { email };
        self.session = Some(session.clone());
        Ok(session)
    }

    fn sign_out(&mut self) {
        self.session = None;
    }

    fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn needs_bootstrap(&self) -> Result<bool> {
        Ok(admin_count(&self.conn)? == 0)
    }
}

fn admin_count(conn: &rusqlite::Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM admins", [], |row| row.get(0))
        .context("failed to count admin accounts")
}

fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(PASSWORD_SALT);
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
