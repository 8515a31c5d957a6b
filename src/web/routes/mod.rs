pub mod approval;
pub mod roster;
