mod common;

use festreg::error::AppError;
use festreg::services::final_approval_service;
use festreg::services::roster_service::{self, NewAccompanistRequest};

use common::{
    count_scalar, insert_accompanist, insert_application, insert_college,
    insert_eligible_student, insert_student, seed_pool, setup_db, test_config,
};

fn accompanist_request(name: &str) -> NewAccompanistRequest {
    NewAccompanistRequest {
        student_id: None,
        name: name.to_string(),
        email: None,
        phone: None,
        accompanist_type: Some("FACULTY".to_string()),
        is_team_manager: false,
        photo_url: None,
        id_card_url: None,
    }
}

#[tokio::test]
async fn accompanist_lifecycle() {
    let (pool, _dir) = setup_db().await;
    insert_college(&pool, "c1", "KLE").await;

    let id = roster_service::create_accompanist(&pool, "c1", accompanist_request("Prof. Kulkarni"))
        .await
        .expect("create accompanist");
    assert_eq!(
        count_scalar(&pool, "SELECT COUNT(*) FROM accompanists WHERE is_deleted = 0").await,
        1
    );

    roster_service::remove_accompanist(&pool, "c1", &id)
        .await
        .expect("remove accompanist");
    assert_eq!(
        count_scalar(&pool, "SELECT COUNT(*) FROM accompanists WHERE is_deleted = 0").await,
        0
    );

    let missing = roster_service::remove_accompanist(&pool, "c1", &id).await;
    assert!(matches!(missing, Err(AppError::AccompanistNotFound)));
}

#[tokio::test]
async fn create_accompanist_rejects_blank_name() {
    let (pool, _dir) = setup_db().await;
    insert_college(&pool, "c1", "KLE").await;

    let result =
        roster_service::create_accompanist(&pool, "c1", accompanist_request("   ")).await;
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn team_manager_survives_normal_deletion() {
    let (pool, _dir) = setup_db().await;
    insert_college(&pool, "c1", "KLE").await;
    insert_accompanist(&pool, "tm1", "c1", "Dr. Hegde", None, true).await;

    let result = roster_service::remove_accompanist(&pool, "c1", "tm1").await;
    assert!(matches!(result, Err(AppError::TeamManagerProtected)));
    assert_eq!(
        count_scalar(&pool, "SELECT COUNT(*) FROM accompanists WHERE is_deleted = 0").await,
        1
    );
}

#[tokio::test]
async fn review_application_updates_latest_status() {
    let (pool, _dir) = setup_db().await;
    insert_college(&pool, "c1", "KLE").await;
    insert_student(&pool, "s1", "c1", "Asha Rao").await;
    insert_application(&pool, "s1", "PENDING", "2026-01-10 09:00:00").await;

    let application_id: String =
        sqlx::query_scalar("SELECT application_id FROM student_applications WHERE student_id = 's1'")
            .fetch_one(&pool)
            .await
            .unwrap();

    let status =
        roster_service::review_application(&pool, "c1", &application_id, "approve", "principal-1")
            .await
            .expect("review");
    assert_eq!(status, "APPROVED");

    let (db_status, reviewed_by): (String, String) = sqlx::query_as(
        "SELECT status, reviewed_by FROM student_applications WHERE application_id = ?",
    )
    .bind(&application_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(db_status, "APPROVED");
    assert_eq!(reviewed_by, "principal-1");

    let bad = roster_service::review_application(&pool, "c1", &application_id, "escalate", "p")
        .await;
    assert!(matches!(bad, Err(AppError::InvalidRequest(_))));
}

#[tokio::test]
async fn review_is_scoped_to_the_reviewers_college() {
    let (pool, _dir) = setup_db().await;
    insert_college(&pool, "c1", "KLE").await;
    insert_college(&pool, "c2", "SDM").await;
    insert_student(&pool, "s1", "c1", "Asha Rao").await;
    insert_application(&pool, "s1", "PENDING", "2026-01-10 09:00:00").await;

    let application_id: String =
        sqlx::query_scalar("SELECT application_id FROM student_applications WHERE student_id = 's1'")
            .fetch_one(&pool)
            .await
            .unwrap();

    let result =
        roster_service::review_application(&pool, "c2", &application_id, "approve", "principal-2")
            .await;
    assert!(matches!(result, Err(AppError::Unauthorized)));
}

// Once final approval commits, every roster mutation path is closed.
#[tokio::test]
async fn roster_is_locked_after_final_approval() {
    let (pool, _dir) = setup_db().await;
    insert_college(&pool, "c1", "KLE").await;
    insert_eligible_student(&pool, "s1", "c1", "Asha Rao").await;
    insert_accompanist(&pool, "a1", "c1", "Prof. Kulkarni", None, false).await;
    insert_student(&pool, "s2", "c1", "Meera Iyer").await;
    insert_application(&pool, "s2", "PENDING", "2026-01-11 09:00:00").await;
    seed_pool(&pool, 5).await;

    final_approval_service::run_final_approval(&pool, "c1", "principal-1", &test_config())
        .await
        .expect("approval");

    let create =
        roster_service::create_accompanist(&pool, "c1", accompanist_request("Late Addition")).await;
    assert!(matches!(create, Err(AppError::RosterLocked)));

    let remove = roster_service::remove_accompanist(&pool, "c1", "a1").await;
    assert!(matches!(remove, Err(AppError::RosterLocked)));

    let application_id: String =
        sqlx::query_scalar("SELECT application_id FROM student_applications WHERE student_id = 's2'")
            .fetch_one(&pool)
            .await
            .unwrap();
    let review =
        roster_service::review_application(&pool, "c1", &application_id, "approve", "principal-1")
            .await;
    assert!(matches!(review, Err(AppError::RosterLocked)));

    // The locked roster itself is untouched.
    assert_eq!(
        count_scalar(&pool, "SELECT COUNT(*) FROM final_event_participants").await,
        2
    );
}

#[tokio::test]
async fn mutations_on_unknown_college_are_not_found() {
    let (pool, _dir) = setup_db().await;

    let result =
        roster_service::create_accompanist(&pool, "ghost", accompanist_request("Nobody")).await;
    assert!(matches!(result, Err(AppError::CollegeNotFound)));
}
