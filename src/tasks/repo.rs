use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Task lifecycle: every task starts `Pending`; the only transition is to
/// `Completed`, and re-completing is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub owner_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Escape `%`, `_` and `\` so a title filter is a literal substring match.
fn escape_like(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

impl Task {
    pub async fn create(
        db: &PgPool,
        owner_id: Uuid,
        title: &str,
        description: Option<&str>,
    ) -> sqlx::Result<Task> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, owner_id)
            VALUES ($1, $2, 'Pending', $3)
            RETURNING id, title, description, status, owner_id, created_at
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(owner_id)
        .fetch_one(db)
        .await
    }

    /// List the owner's tasks, newest first. The status filter compares the
    /// raw query text against the stored enum's text form, so an unrecognized
    /// value matches nothing instead of erroring. The title filter is a
    /// case-insensitive substring match.
    pub async fn list_by_owner(
        db: &PgPool,
        owner_id: Uuid,
        status: Option<&str>,
        title: Option<&str>,
    ) -> sqlx::Result<Vec<Task>> {
        let title_pattern = title.map(|t| format!("%{}%", escape_like(t)));
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, owner_id, created_at
            FROM tasks
            WHERE owner_id = $1
              AND ($2::text IS NULL OR status::text = $2)
              AND ($3::text IS NULL OR title ILIKE $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(status)
        .bind(title_pattern)
        .fetch_all(db)
        .await
    }

    /// Set status to `Completed` on the owned task. Idempotent; `None` means
    /// the task does not exist or belongs to someone else, which callers must
    /// treat identically.
    pub async fn mark_completed(db: &PgPool, owner_id: Uuid, id: Uuid) -> sqlx::Result<Option<Task>> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = 'Completed'
            WHERE id = $1 AND owner_id = $2
            RETURNING id, title, description, status, owner_id, created_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(db)
        .await
    }

    /// Overwrite title and description on the owned task.
    pub async fn update_content(
        db: &PgPool,
        owner_id: Uuid,
        id: Uuid,
        title: &str,
        description: Option<&str>,
    ) -> sqlx::Result<Option<Task>> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $3, description = $4
            WHERE id = $1 AND owner_id = $2
            RETURNING id, title, description, status, owner_id, created_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .fetch_optional(db)
        .await
    }

    /// Delete the owned task. Returns whether a row was removed.
    pub async fn delete(db: &PgPool, owner_id: Uuid, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn escape_like_leaves_plain_text() {
        assert_eq!(escape_like("Buy milk"), "Buy milk");
    }

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\temp"), "c:\\\\temp");
    }

    #[test]
    fn status_serializes_as_enum_label() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Pending).unwrap(),
            "\"Pending\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Completed).unwrap(),
            "\"Completed\""
        );
    }

    #[test]
    fn task_serializes_camel_case() {
        let task = Task {
            id: Uuid::new_v4(),
            title: "Buy milk".into(),
            description: Some("2%".into()),
            status: TaskStatus::Pending,
            owner_id: Uuid::new_v4(),
            created_at: datetime!(2026-01-01 00:00 UTC),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("ownerId").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["createdAt"], "2026-01-01T00:00:00Z");
    }
}
