#![allow(dead_code)]

use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tempfile::TempDir;
use uuid::Uuid;

use festreg::config::Config;

// Fresh on-disk database per test. A file (not :memory:) so multiple pool
// connections see the same database, which the concurrency tests need.
pub async fn setup_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("festreg.sqlite");

    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .expect("connect test db");

    sqlx::raw_sql(include_str!("../../schema.sql"))
        .execute(&pool)
        .await
        .expect("apply schema");

    (pool, dir)
}

pub fn test_config() -> Config {
    Config {
        event_categories: vec![
            "quiz".to_string(),
            "debate".to_string(),
            "folk_orchestra".to_string(),
        ],
        final_approval_timeout_ms: 15_000,
    }
}

pub async fn insert_college(pool: &SqlitePool, college_id: &str, code: &str) {
    sqlx::query("INSERT INTO colleges (college_id, code, name, max_participants) VALUES (?, ?, ?, 45)")
        .bind(college_id)
        .bind(code)
        .bind(format!("{} College of Arts", code))
        .execute(pool)
        .await
        .expect("insert college");
}

pub async fn insert_student(pool: &SqlitePool, student_id: &str, college_id: &str, name: &str) {
    sqlx::query(
        "INSERT INTO students (student_id, college_id, name, email, gender, course, year_of_study)
         VALUES (?, ?, ?, ?, 'F', 'BA Music', 2)",
    )
    .bind(student_id)
    .bind(college_id)
    .bind(name)
    .bind(format!("{}@example.edu", student_id))
    .execute(pool)
    .await
    .expect("insert student");
}

pub async fn insert_application(
    pool: &SqlitePool,
    student_id: &str,
    status: &str,
    created_at: &str,
) {
    sqlx::query(
        "INSERT INTO student_applications (application_id, student_id, status, created_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(student_id)
    .bind(status)
    .bind(created_at)
    .execute(pool)
    .await
    .expect("insert application");
}

pub async fn assign_event(pool: &SqlitePool, college_id: &str, student_id: &str, category: &str) {
    sqlx::query(
        "INSERT INTO event_assignments (assignment_id, college_id, student_id, category, role)
         VALUES (?, ?, ?, ?, 'PARTICIPANT')",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(college_id)
    .bind(student_id)
    .bind(category)
    .execute(pool)
    .await
    .expect("insert event assignment");
}

pub async fn insert_accompanist(
    pool: &SqlitePool,
    accompanist_id: &str,
    college_id: &str,
    name: &str,
    student_id: Option<&str>,
    is_team_manager: bool,
) {
    sqlx::query(
        "INSERT INTO accompanists (accompanist_id, college_id, student_id, name, accompanist_type, is_team_manager)
         VALUES (?, ?, ?, ?, 'FACULTY', ?)",
    )
    .bind(accompanist_id)
    .bind(college_id)
    .bind(student_id)
    .bind(name)
    .bind(is_team_manager as i64)
    .execute(pool)
    .await
    .expect("insert accompanist");
}

// Deterministic pool entries: p0000/CODE-0000 .. so tests can reason about
// reservation order.
pub async fn seed_pool(pool: &SqlitePool, count: usize) {
    for i in 0..count {
        sqlx::query("INSERT OR IGNORE INTO qr_code_pool (pool_entry_id, code) VALUES (?, ?)")
            .bind(format!("p{:04}", i))
            .bind(format!("CODE-{:04}", i))
            .execute(pool)
            .await
            .expect("seed pool entry");
    }
}

// A student who is fully eligible: approved latest application plus one
// event assignment in a configured category.
pub async fn insert_eligible_student(
    pool: &SqlitePool,
    student_id: &str,
    college_id: &str,
    name: &str,
) {
    insert_student(pool, student_id, college_id, name).await;
    insert_application(pool, student_id, "APPROVED", "2026-01-10 09:00:00").await;
    assign_event(pool, college_id, student_id, "quiz").await;
}

pub async fn count_scalar(pool: &SqlitePool, sql: &str) -> i64 {
    sqlx::query_scalar(sql)
        .fetch_one(pool)
        .await
        .expect("count query")
}
