use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection};

use crate::models::{Teacher, TeacherDraft};

use super::store::{SqliteStore, TeacherStore};

/// Scalar columns selected for every roster query, kept in one place so the
/// row-mapping closure stays in sync with the SQL.
const TEACHER_COLUMNS: &str = "id, last_name, first_name, middle_name, position, bio, \
     photo_url, contact_email, contact_phone, public, order_index, created_at, updated_at";

impl TeacherStore for SqliteStore {
    fn list_public(&self) -> Result<Vec<Teacher>> {
        fetch_roster(&self.conn, true)
    }

    fn list_all(&self) -> Result<Vec<Teacher>> {
        fetch_roster(&self.conn, false)
    }

    fn get(&self, id: i64) -> Result<Teacher> {
        let sql = format!("SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = ?1");
        let mut teacher = self
            .conn
            .query_row(&sql, params![id], map_teacher_row)
            .context("Teacher not found")?;
        teacher.categories = fetch_tags_for(&self.conn, "teacher_categories", id)?;
        teacher.subjects = fetch_tags_for(&self.conn, "teacher_subjects", id)?;
        Ok(teacher)
    }

    fn insert(&mut self, draft: &TeacherDraft) -> Result<Teacher> {
        let tx = self.conn.transaction().context("failed to begin insert")?;

        // New profiles append at the end of the roster rather than relying on
        // insertion-order luck.
        let order_index: i64 = tx
            .query_row(
                "SELECT COALESCE(MAX(order_index) + 1, 0) FROM teachers",
                [],
                |row| row.get(0),
            )
            .context("failed to compute next order index")?;

        tx.execute(
            "INSERT INTO teachers (last_name, first_name, middle_name, position, bio,
                 photo_url, contact_email, contact_phone, public, order_index)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                draft.last_name,
                draft.first_name,
                draft.middle_name,
                draft.position,
                draft.bio,
                draft.photo_url,
                draft.contact_email,
                draft.contact_phone,
                draft.public,
                order_index,
            ],
        )
        .context("failed to insert teacher")?;

        let id = tx.last_insert_rowid();
        replace_tags(&tx, "teacher_categories", id, &draft.categories)?;
        replace_tags(&tx, "teacher_subjects", id, &draft.subjects)?;
        tx.commit().context("failed to commit insert")?;

        self.get(id)
    }

    fn update(&mut self, id: i64, draft: &TeacherDraft) -> Result<Teacher> {
        let tx = self.conn.transaction().context("failed to begin update")?;

        let updated = tx
            .execute(
                "UPDATE teachers SET last_name = ?1, first_name = ?2, middle_name = ?3,
                     position = ?4, bio = ?5, photo_url = ?6, contact_email = ?7,
                     contact_phone = ?8, public = ?9, updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?10",
                params![
                    draft.last_name,
                    draft.first_name,
                    draft.middle_name,
                    draft.position,
                    draft.bio,
                    draft.photo_url,
                    draft.contact_email,
                    draft.contact_phone,
                    draft.public,
                    id,
                ],
            )
            .context("failed to update teacher")?;

        if updated == 0 {
            return Err(anyhow!("Teacher not found"));
        }

        replace_tags(&tx, "teacher_categories", id, &draft.categories)?;
        replace_tags(&tx, "teacher_subjects", id, &draft.subjects)?;
        tx.commit().context("failed to commit update")?;

        self.get(id)
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        // The child tables cascade, so category and subject rows go with the
        // profile automatically.
        let deleted = self
            .conn
            .execute("DELETE FROM teachers WHERE id = ?1", params![id])
            .context("failed to delete teacher")?;

        if deleted == 0 {
            Err(anyhow!("Teacher not found"))
        } else {
            Ok(())
        }
    }

    fn set_order_index(&mut self, id: i64, order_index: i64) -> Result<()> {
        let updated = self
            .conn
            .execute(
                "UPDATE teachers SET order_index = ?1, updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?2",
                params![order_index, id],
            )
            .context("failed to update order index")?;

        if updated == 0 {
            Err(anyhow!("Teacher not found"))
        } else {
            Ok(())
        }
    }

    fn set_public(&mut self, id: i64, public: bool) -> Result<()> {
        let updated = self
            .conn
            .execute(
                "UPDATE teachers SET public = ?1, updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?2",
                params![public, id],
            )
            .context("failed to update visibility")?;

        if updated == 0 {
            Err(anyhow!("Teacher not found"))
        } else {
            Ok(())
        }
    }

    fn revision(&self) -> Result<i64> {
        // Moves whenever another connection commits, which is exactly the
        // "something changed, re-fetch everything" signal the UI wants.
        self.conn
            .query_row("PRAGMA data_version", [], |row| row.get(0))
            .context("failed to read data version")
    }
}

/// Retrieve the roster sorted by order index (ties broken stably by id). The
/// query doubles as the single source of truth for how records are ordered in
/// both the gallery and the admin list.
fn fetch_roster(conn: &Connection, only_public: bool) -> Result<Vec<Teacher>> {
    let filter = if only_public { "WHERE public = 1" } else { "" };
    let sql =
        format!("SELECT {TEACHER_COLUMNS} FROM teachers {filter} ORDER BY order_index, id");

    let mut stmt = conn.prepare(&sql).context("failed to prepare roster query")?;
    let mut teachers = stmt
        .query_map([], map_teacher_row)
        .context("failed to load teachers")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect teachers")?;

    let mut categories = fetch_all_tags(conn, "teacher_categories")?;
    let mut subjects = fetch_all_tags(conn, "teacher_subjects")?;
    for teacher in &mut teachers {
        teacher.categories = categories.remove(&teacher.id).unwrap_or_default();
        teacher.subjects = subjects.remove(&teacher.id).unwrap_or_default();
    }

    Ok(teachers)
}

fn map_teacher_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Teacher> {
    Ok(Teacher {
        id: row.get(0)?,
        last_name: row.get(1)?,
        first_name: row.get(2)?,
        middle_name: row.get(3)?,
        position: row.get(4)?,
        bio: row.get(5)?,
        photo_url: row.get(6)?,
        contact_email: row.get(7)?,
        contact_phone: row.get(8)?,
        public: row.get(9)?,
        order_index: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
        categories: Vec::new(),
        subjects: Vec::new(),
    })
}

/// Load every tag row grouped per teacher, preserving insertion order via the
/// `ord` column.
fn fetch_all_tags(conn: &Connection, table: &str) -> Result<HashMap<i64, Vec<String>>> {
    let sql = format!("SELECT teacher_id, name FROM {table} ORDER BY teacher_id, ord");
    let mut stmt = conn
        .prepare(&sql)
        .with_context(|| format!("failed to prepare {table} query"))?;

    let mut rows = stmt
        .query([])
        .with_context(|| format!("failed to execute {table} query"))?;

    let mut tags: HashMap<i64, Vec<String>> = HashMap::new();
    while let Some(row) = rows
        .next()
        .with_context(|| format!("failed to fetch {table} row"))?
    {
        let teacher_id: i64 = row.get(0).context("failed to read tag owner")?;
        let name: String = row.get(1).context("failed to read tag name")?;
        tags.entry(teacher_id).or_default().push(name);
    }

    Ok(tags)
}

fn fetch_tags_for(conn: &Connection, table: &str, teacher_id: i64) -> Result<Vec<String>> {
    let sql = format!("SELECT name FROM {table} WHERE teacher_id = ?1 ORDER BY ord");
    let mut stmt = conn
        .prepare(&sql)
        .with_context(|| format!("failed to prepare {table} lookup"))?;

    let names = stmt
        .query_map(params![teacher_id], |row| row.get(0))
        .with_context(|| format!("failed to iterate {table}"))?
        .collect::<Result<Vec<String>, _>>()
        .with_context(|| format!("failed to collect {table}"))?;

    Ok(names)
}

fn replace_tags(conn: &Connection, table: &str, teacher_id: i64, names: &[String]) -> Result<()> {
    let delete_sql = format!("DELETE FROM {table} WHERE teacher_id = ?1");
    conn.execute(&delete_sql, params![teacher_id])
        .with_context(|| format!("failed to clear {table}"))?;

    let insert_sql = format!("INSERT INTO {table} (teacher_id, ord, name) VALUES (?1, ?2, ?3)");
    for (ord, name) in names.iter().enumerate() {
        conn.execute(&insert_sql, params![teacher_id, ord as i64, name])
            .with_context(|| format!("failed to insert into {table}"))?;
    }

    Ok(())
}
