use anyhow::anyhow;
use chrono::{DateTime, Utc};
use libsql::Connection;
use serde::{Deserialize, Serialize};

use crate::error::MarkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Movie,
    Series,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movie => "Movie",
            Category::Series => "Series",
        }
    }

    /// Exact, case-sensitive match.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Movie" => Some(Category::Movie),
            "Series" => Some(Category::Series),
            _ => None,
        }
    }
}

/// One independent set of marks, each backed by its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Favorites,
    Watched,
}

impl Collection {
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Favorites => "favorite_items",
            Collection::Watched => "watched_items",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Favorites => "favorites",
            Collection::Watched => "watched",
        }
    }

    pub fn not_found_message(&self) -> &'static str {
        match self {
            Collection::Favorites => "Not favorite",
            Collection::Watched => "Not watched",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mark {
    pub id: i64,
    pub external_id: i64,
    pub category: Category,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The listed projection of a mark; `id` and `created_at` stay internal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkSummary {
    pub external_id: i64,
    pub category: Category,
    pub title: Option<String>,
    pub poster_path: Option<String>,
}

impl From<Mark> for MarkSummary {
    fn from(mark: Mark) -> Self {
        MarkSummary {
            external_id: mark.external_id,
            category: mark.category,
            title: mark.title,
            poster_path: mark.poster_path,
        }
    }
}

/// A validated mark request, ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMark {
    pub external_id: i64,
    pub category: Category,
    pub title: Option<String>,
    pub poster_path: Option<String>,
}

pub struct MarkStore<'a> {
    conn: &'a Connection,
    collection: Collection,
}

impl<'a> MarkStore<'a> {
    pub fn new(conn: &'a Connection, collection: Collection) -> Self {
        Self { conn, collection }
    }

    /// Stores `input` unless a mark with the same `external_id` already
    /// exists, in which case the stored mark is returned untouched. The
    /// category is not part of the lookup.
    pub async fn mark(&self, input: NewMark) -> Result<Mark, MarkError> {
        let table = self.collection.table();
        let tx = self.conn.transaction().await?;

        let insert = format!(
            r#"
            INSERT INTO {table} (external_id, category, title, poster_path)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(external_id) DO NOTHING
        "#
        );
        let inserted = tx
            .execute(
                &insert,
                libsql::params![
                    input.external_id,
                    input.category.as_str(),
                    input.title.as_deref(),
                    input.poster_path.as_deref()
                ],
            )
            .await?;

        let mark = find_by_external_id(&tx, table, input.external_id)
            .await?
            .ok_or_else(|| anyhow!("mark {} missing from {} after insert", input.external_id, table))?;

        tx.commit().await?;

        if inserted > 0 {
            tracing::info!(collection = self.collection.name(), external_id = mark.external_id, "mark created");
        } else {
            tracing::debug!(collection = self.collection.name(), external_id = mark.external_id, "mark already present");
        }

        Ok(mark)
    }

    /// Removes the mark matching both `category` and `external_id`. The
    /// category is compared as raw text, so an unknown value never matches.
    pub async fn unmark(&self, category: &str, external_id: i64) -> Result<bool, MarkError> {
        let query = format!("DELETE FROM {} WHERE external_id = ? AND category = ?", self.collection.table());
        let removed = self
            .conn
            .execute(&query, libsql::params![external_id, category])
            .await?;

        if removed == 0 {
            return Err(MarkError::NotFound(self.collection.not_found_message().to_string()));
        }

        tracing::info!(collection = self.collection.name(), external_id, category, "mark removed");
        Ok(true)
    }

    /// Newest first. Marks sharing a timestamp come back in reverse insertion order.
    pub async fn list(&self, category: Option<Category>) -> Result<Vec<MarkSummary>, MarkError> {
        let table = self.collection.table();
        let mut marks = Vec::new();

        let mut rows = if let Some(category) = category {
            let query = format!(
                r#"
                SELECT external_id, category, title, poster_path
                FROM {table}
                WHERE category = ?
                ORDER BY created_at DESC, id DESC
            "#
            );
            self.conn.query(&query, libsql::params![category.as_str()]).await?
        } else {
            let query = format!(
                r#"
                SELECT external_id, category, title, poster_path
                FROM {table}
                ORDER BY created_at DESC, id DESC
            "#
            );
            self.conn.query(&query, ()).await?
        };

        while let Some(row) = rows.next().await? {
            marks.push(row_to_summary(&row)?);
        }

        Ok(marks)
    }

    pub async fn find(&self, external_id: i64) -> Result<Option<Mark>, MarkError> {
        find_by_external_id(self.conn, self.collection.table(), external_id).await
    }
}

async fn find_by_external_id(conn: &Connection, table: &str, external_id: i64) -> Result<Option<Mark>, MarkError> {
    let query = format!(
        r#"
        SELECT id, external_id, category, title, poster_path, created_at
        FROM {table} WHERE external_id = ?
    "#
    );

    let mut rows = conn.query(&query, libsql::params![external_id]).await?;

    if let Some(row) = rows.next().await? {
        Ok(Some(row_to_mark(&row)?))
    } else {
        Ok(None)
    }
}

fn parse_category(raw: &str) -> Result<Category, MarkError> {
    Category::from_str(raw).ok_or_else(|| MarkError::Persistence(anyhow!("invalid stored category: {}", raw)))
}

fn row_to_mark(row: &libsql::Row) -> Result<Mark, MarkError> {
    let category: String = row.get(2)?;
    let created_at: String = row.get(5)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| anyhow!("invalid created_at {}: {}", created_at, e))?
        .with_timezone(&Utc);

    Ok(Mark {
        id: row.get(0)?,
        external_id: row.get(1)?,
        category: parse_category(&category)?,
        title: row.get(3)?,
        poster_path: row.get(4)?,
        created_at,
    })
}

fn row_to_summary(row: &libsql::Row) -> Result<MarkSummary, MarkError> {
    let category: String = row.get(1)?;

    Ok(MarkSummary {
        external_id: row.get(0)?,
        category: parse_category(&category)?,
        title: row.get(2)?,
        poster_path: row.get(3)?,
    })
}
