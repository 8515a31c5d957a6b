pub mod accompanists;
pub mod applications;
pub mod colleges;
pub mod final_participants;
pub mod qr_code_pool;
pub mod students;

pub use accompanists::AccompanistRow;
pub use applications::ApplicationRow;
pub use colleges::CollegeRow;
pub use final_participants::FinalParticipantRow;
pub use qr_code_pool::QrPoolEntryRow;
pub use students::EligibleStudentRow;
