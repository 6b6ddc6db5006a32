pub mod appetite;
pub mod due_diligence;
pub mod records;
pub mod register;
pub mod router;
pub mod schedule;
pub mod tier;
pub mod vendor;
