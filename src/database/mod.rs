pub mod accompanist_repo;
pub mod application_repo;
pub mod college_repo;
pub mod final_participant_repo;
pub mod qr_pool_repo;
pub mod student_repo;
