use rusqlite::{params, Connection, OptionalExtension};

use crate::db::models::User;

fn row_to_user(row: &rusqlite::Row<'_>) -> Result<User, rusqlite::Error> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

pub fn create(
    conn: &Connection,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, rusqlite::Error> {
    let id = uuid::Uuid::now_v7().to_string();
    conn.execute(
        "INSERT INTO users (id, name, email, password_hash) VALUES (?1, ?2, ?3, ?4)",
        params![id, name, email, password_hash],
    )?;
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        params![id],
        row_to_user,
    )
}

pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<User>, rusqlite::Error> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
        params![email],
        row_to_user,
    )
    .optional()
}

pub fn find_by_id(conn: &Connection, id: &str) -> Result<Option<User>, rusqlite::Error> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        params![id],
        row_to_user,
    )
    .optional()
}

/// Delete a user. Presentations and slides go with it (FK cascade).
pub fn delete(conn: &Connection, id: &str) -> Result<bool, rusqlite::Error> {
    let affected = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, run_migrations};
    use crate::state::DbPool;

    fn test_pool() -> DbPool {
        let pool = create_memory_pool().unwrap();
        run_migrations(&pool).unwrap();
        pool
    }

    #[test]
    fn create_and_find_by_email() {
        let pool = test_pool();
        let conn = pool.get().unwrap();

        let user = create(&conn, "Alice", "alice@example.com", "hash").unwrap();
        assert_eq!(user.name, "Alice");
        assert!(!user.id.is_empty());

        let found = find_by_email(&conn, "alice@example.com").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.password_hash, "hash");

        assert!(find_by_email(&conn, "bob@example.com").unwrap().is_none());
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let pool = test_pool();
        let conn = pool.get().unwrap();

        create(&conn, "Alice", "alice@example.com", "hash").unwrap();
        let dup = create(&conn, "Also Alice", "alice@example.com", "hash2");
        assert!(dup.is_err());
    }

    #[test]
    fn delete_removes_user() {
        let pool = test_pool();
        let conn = pool.get().unwrap();

        let user = create(&conn, "Alice", "alice@example.com", "hash").unwrap();
        assert!(delete(&conn, &user.id).unwrap());
        assert!(find_by_id(&conn, &user.id).unwrap().is_none());
        assert!(!delete(&conn, &user.id).unwrap());
    }
}
