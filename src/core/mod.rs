pub mod calculator;
pub mod context;
pub mod dashboard;
pub mod history;
pub mod log;
pub mod roster;
pub mod take;
pub mod walker;
