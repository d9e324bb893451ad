pub mod job;
pub mod rows;
