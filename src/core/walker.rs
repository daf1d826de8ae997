//! Roster traversal for one attendance session.
//!
//! The walker owns an immutable roster snapshot and moves through it one
//! student at a time; each step records exactly one decision. It knows
//! nothing about where the decisions come from (keyboard, script, tests).

use crate::core::calculator::aggregate::aggregate;
use crate::errors::{AppError, AppResult};
use crate::models::session::{Aggregates, CompletedSession, Decision};
use crate::models::status::AttendanceStatus;
use crate::models::student::Student;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkerState {
    InProgress { position: usize },
    Complete,
}

#[derive(Debug, Clone)]
pub struct SessionWalker {
    subject: String,
    started_at: DateTime<Local>,
    roster: Vec<Student>,
    decisions: Vec<Decision>,
}

impl SessionWalker {
    /// Start a walk over `roster` in its given order.
    pub fn start(subject: &str, roster: Vec<Student>) -> Self {
        Self::start_at(subject, roster, Local::now())
    }

    pub fn start_at(subject: &str, roster: Vec<Student>, started_at: DateTime<Local>) -> Self {
        Self {
            subject: subject.to_string(),
            started_at,
            decisions: Vec::with_capacity(roster.len()),
            roster,
        }
    }

    pub fn state(&self) -> WalkerState {
        if self.is_complete() {
            WalkerState::Complete
        } else {
            WalkerState::InProgress {
                position: self.position(),
            }
        }
    }

    /// Index of the next student to mark; equals the roster length once complete.
    pub fn position(&self) -> usize {
        self.decisions.len()
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.position() >= self.roster.len()
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn roster(&self) -> &[Student] {
        &self.roster
    }

    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    /// The student waiting for a decision, if any.
    pub fn current(&self) -> Option<&Student> {
        self.roster.get(self.position())
    }

    /// Mark the current student and advance by one.
    ///
    /// Past the end of the roster nothing changes and `OutOfRange` is returned.
    pub fn decide(&mut self, status: AttendanceStatus) -> AppResult<WalkerState> {
        let Some(student) = self.current() else {
            return Err(AppError::OutOfRange(format!(
                "all {} students already marked",
                self.roster.len()
            )));
        };

        let decision = Decision {
            student_id: student.id,
            status,
        };
        self.decisions.push(decision);

        Ok(self.state())
    }

    /// Throw away every decision and restart from the first student.
    ///
    /// A walk that was already finalized is not touched in storage: the
    /// reset walker is a brand-new session with a fresh start time.
    pub fn retake(&mut self) {
        self.decisions.clear();
        self.started_at = Local::now();
    }

    /// Counts for the decisions recorded so far.
    pub fn aggregates(&self) -> Aggregates {
        aggregate(&self.decisions, self.roster.len())
    }

    /// Snapshot of a finished walk for the history store.
    pub fn finish(&self) -> AppResult<CompletedSession> {
        if !self.is_complete() {
            return Err(AppError::Validation(format!(
                "session incomplete: {} of {} students marked",
                self.position(),
                self.roster.len()
            )));
        }

        Ok(CompletedSession {
            subject: self.subject.clone(),
            started_at: self.started_at,
            roster: self.roster.clone(),
            decisions: self.decisions.clone(),
            aggregates: self.aggregates(),
        })
    }
}
