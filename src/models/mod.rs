pub mod gender;
pub mod history;
pub mod session;
pub mod status;
pub mod student;
pub mod teacher;
