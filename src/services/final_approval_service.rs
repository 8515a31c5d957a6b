use std::time::Duration;

use serde::Serialize;
use sqlx::SqlitePool;
use tokio::time::timeout;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::database::{college_repo, final_participant_repo, qr_pool_repo};
use crate::database::final_participant_repo::NewFinalParticipant;
use crate::error::AppError;
use crate::services::eligibility_service;

#[derive(Debug, Serialize)]
pub struct FinalApprovalReport {
    pub college_id: String,
    pub students_inserted: usize,
    pub accompanists_inserted: usize,
    pub duplicates_removed: usize,
    pub total_participants: usize,
    pub codes_remaining: i64,
}

// The one-time, irrevocable approval of a college's roster. Everything below
// runs in a single BEGIN IMMEDIATE transaction; any error before commit rolls
// the whole attempt back, so a failed or timed-out run leaves no participant
// rows and no consumed pool entries behind.
pub async fn run_final_approval(
    pool: &SqlitePool,
    college_id: &str,
    approver_id: &str,
    config: &Config,
) -> Result<FinalApprovalReport, AppError> {
    let budget = Duration::from_millis(config.final_approval_timeout_ms);
    match timeout(budget, approve_inner(pool, college_id, approver_id, config)).await {
        Ok(result) => result,
        Err(_) => {
            warn!(college_id, "final_approval_timed_out");
            Err(AppError::Timeout)
        }
    }
}

async fn approve_inner(
    pool: &SqlitePool,
    college_id: &str,
    approver_id: &str,
    config: &Config,
) -> Result<FinalApprovalReport, AppError> {
    // BEGIN IMMEDIATE takes the database write lock up front. Concurrent
    // approval attempts serialize here; one that cannot get the lock within
    // busy_timeout surfaces as ConcurrentConflict and may simply be retried.
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let Some(college) = college_repo::load_for_approval(&mut tx, college_id).await? else {
        return Err(AppError::CollegeNotFound);
    };
    if college.is_final_approved != 0 {
        return Err(AppError::AlreadyApproved);
    }

    let roster = eligibility_service::resolve(&mut tx, college_id, &config.event_categories).await?;
    if roster.persons.is_empty() {
        return Err(AppError::NoEligibleParticipants);
    }
    let needed = roster.persons.len();
    if needed as i64 > college.max_participants {
        // The quota is advisory at this stage; registration should have
        // capped the roster long before final approval.
        warn!(
            college_id,
            needed,
            quota = college.max_participants,
            "final_approval_roster_over_quota"
        );
    }

    let reserved = qr_pool_repo::reserve_unused(&mut tx, needed as i64).await?;
    if reserved.len() < needed {
        return Err(AppError::PoolExhausted {
            needed: needed as i64,
            available: reserved.len() as i64,
        });
    }

    // Insert one immutable participant row per person; code i belongs to
    // participant i, so the generated ids are collected in the same order.
    let mut participant_ids = Vec::with_capacity(needed);
    for (person, entry) in roster.persons.iter().zip(&reserved) {
        let participant_id = Uuid::new_v4().to_string();
        final_participant_repo::insert_participant(
            &mut tx,
            NewFinalParticipant {
                participant_id: &participant_id,
                college_id,
                person_type: person.person_type.as_str(),
                student_id: person.student_id.as_deref(),
                accompanist_id: person.accompanist_id.as_deref(),
                name: &person.name,
                email: person.email.as_deref(),
                phone: person.phone.as_deref(),
                gender: person.gender.as_deref(),
                course: person.course.as_deref(),
                year_of_study: person.year_of_study,
                accompanist_type: person.accompanist_type.as_deref(),
                is_team_manager: person.is_team_manager,
                photo_url: person.photo_url.as_deref(),
                id_card_url: person.id_card_url.as_deref(),
                qr_code: &entry.code,
                approved_by: approver_id,
            },
        )
        .await?;
        participant_ids.push(participant_id);
    }

    for (entry, participant_id) in reserved.iter().zip(&participant_ids) {
        let updated = qr_pool_repo::mark_used(&mut tx, &entry.pool_entry_id, participant_id).await?;
        if updated != 1 {
            // A reserved entry vanished under us inside our own transaction;
            // nothing sane can continue from here.
            return Err(AppError::Unexpected(sqlx::Error::RowNotFound));
        }
    }

    let locked = college_repo::set_final_approved(&mut tx, college_id, approver_id).await?;
    if locked != 1 {
        return Err(AppError::AlreadyApproved);
    }

    let codes_remaining = qr_pool_repo::count_unused(&mut tx).await?;
    tx.commit().await?;

    let report = FinalApprovalReport {
        college_id: college_id.to_string(),
        students_inserted: roster.student_count,
        accompanists_inserted: roster.accompanist_count,
        duplicates_removed: roster.duplicates_removed,
        total_participants: needed,
        codes_remaining,
    };
    info!(
        college_id,
        students = report.students_inserted,
        accompanists = report.accompanists_inserted,
        duplicates_removed = report.duplicates_removed,
        codes_remaining,
        approver = approver_id,
        "final_approval_committed"
    );
    Ok(report)
}
