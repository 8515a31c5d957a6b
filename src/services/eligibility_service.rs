use std::collections::HashSet;

use sqlx::SqliteConnection;

use crate::database::{accompanist_repo, student_repo};
use crate::models::{AccompanistRow, EligibleStudentRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonType {
    Student,
    Accompanist,
}

impl PersonType {
    pub fn as_str(self) -> &'static str {
        match self {
            PersonType::Student => "STUDENT",
            PersonType::Accompanist => "ACCOMPANIST",
        }
    }
}

// One eligible person, carrying every field that gets denormalized into the
// immutable participant record at approval time.
#[derive(Debug, Clone)]
pub struct EligiblePerson {
    pub person_type: PersonType,
    pub student_id: Option<String>,
    pub accompanist_id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub course: Option<String>,
    pub year_of_study: Option<i64>,
    pub accompanist_type: Option<String>,
    pub is_team_manager: bool,
    pub photo_url: Option<String>,
    pub id_card_url: Option<String>,
}

pub struct EligibleRoster {
    pub persons: Vec<EligiblePerson>,
    pub student_count: usize,
    pub accompanist_count: usize,
    pub duplicates_removed: usize,
}

// The definitive participant set for one college: students whose latest
// application is APPROVED and who are assigned to at least one configured
// event category, then the active accompanists. An accompanist who is also
// one of those students is dropped so nobody is counted twice. Order is
// stable: students ascending by id, then accompanists ascending by id.
pub async fn resolve(
    conn: &mut SqliteConnection,
    college_id: &str,
    categories: &[String],
) -> sqlx::Result<EligibleRoster> {
    let students =
        student_repo::list_approved_event_students(&mut *conn, college_id, categories).await?;
    let accompanists = accompanist_repo::list_active(&mut *conn, college_id).await?;

    let student_ids: HashSet<&str> = students.iter().map(|s| s.student_id.as_str()).collect();

    let mut persons: Vec<EligiblePerson> = students.iter().map(student_person).collect();
    let student_count = persons.len();

    let mut duplicates_removed = 0;
    let mut accompanist_count = 0;
    for acc in &accompanists {
        let already_competing = acc
            .student_id
            .as_deref()
            .is_some_and(|id| student_ids.contains(id));
        if already_competing {
            duplicates_removed += 1;
            continue;
        }
        persons.push(accompanist_person(acc));
        accompanist_count += 1;
    }

    Ok(EligibleRoster {
        persons,
        student_count,
        accompanist_count,
        duplicates_removed,
    })
}

fn student_person(row: &EligibleStudentRow) -> EligiblePerson {
    EligiblePerson {
        person_type: PersonType::Student,
        student_id: Some(row.student_id.clone()),
        accompanist_id: None,
        name: row.name.clone(),
        email: row.email.clone(),
        phone: row.phone.clone(),
        gender: row.gender.clone(),
        course: row.course.clone(),
        year_of_study: row.year_of_study,
        accompanist_type: None,
        is_team_manager: false,
        photo_url: row.photo_url.clone(),
        id_card_url: row.id_card_url.clone(),
    }
}

fn accompanist_person(row: &AccompanistRow) -> EligiblePerson {
    EligiblePerson {
        person_type: PersonType::Accompanist,
        student_id: row.student_id.clone(),
        accompanist_id: Some(row.accompanist_id.clone()),
        name: row.name.clone(),
        email: row.email.clone(),
        phone: row.phone.clone(),
        gender: None,
        course: None,
        year_of_study: None,
        accompanist_type: row.accompanist_type.clone(),
        is_team_manager: row.is_team_manager != 0,
        photo_url: row.photo_url.clone(),
        id_card_url: row.id_card_url.clone(),
    }
}
