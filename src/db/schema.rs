//! DDL for the `students` table, one flavour per supported engine.

use crate::config::Backend;

pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    course TEXT NOT NULL,
    mobile TEXT NOT NULL
)
"#;

/// `BIGINT` keeps ids decodable as `i64` through the `Any` driver.
pub const MYSQL_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    course VARCHAR(255) NOT NULL,
    mobile VARCHAR(64) NOT NULL
)
"#;

pub fn init_statement(backend: Backend) -> &'static str {
    match backend {
        Backend::Sqlite => SQLITE_INIT,
        Backend::MySql => MYSQL_INIT,
    }
}
