use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub done: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Todo {
    pub async fn create(
        db: &PgPool,
        user_id: i64,
        title: &str,
        content: &str,
    ) -> sqlx::Result<Todo> {
        sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (user_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, content, done, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(content)
        .fetch_one(db)
        .await
    }

    pub async fn list_by_owner(db: &PgPool, user_id: i64) -> sqlx::Result<Vec<Todo>> {
        sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, user_id, title, content, done, created_at, updated_at
            FROM todos
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> sqlx::Result<Option<Todo>> {
        sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, user_id, title, content, done, created_at, updated_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Returns the number of rows touched so callers can tell a vanished
    /// row apart from a successful update.
    pub async fn update_by_id(
        db: &PgPool,
        id: i64,
        title: &str,
        content: &str,
        done: bool,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET title = $1, content = $2, done = $3, updated_at = now()
            WHERE id = $4
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(done)
        .bind(id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    /// Idempotent; marking an already-done todo is a no-op success.
    pub async fn mark_done_by_id(db: &PgPool, id: i64) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET done = TRUE, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_id(db: &PgPool, id: i64) -> sqlx::Result<u64> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_camel_case_and_keeps_done_false() {
        let todo = Todo {
            id: 1,
            user_id: 2,
            title: "sleep".into(),
            content: "sleep forever".into(),
            done: false,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["userId"], 2);
        assert_eq!(json["done"], false);
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
    }
}
