pub mod eligibility_service;
pub mod final_approval_service;
pub mod roster_service;
