pub mod config;
pub mod db;
pub mod history;
pub mod init;
pub mod log;
pub mod login;
pub mod stats;
pub mod student;
pub mod take;
