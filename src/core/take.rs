//! Drives a [`SessionWalker`] from a stream of inputs and hands every
//! finished walk to the history store.

use crate::core::history::HistoryStore;
use crate::core::roster::RosterStore;
use crate::core::walker::SessionWalker;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::history::HistoryEntry;
use crate::models::status::AttendanceStatus;
use crate::models::teacher::ActiveContext;
use crate::ui::messages::{info, success, warning};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkInput {
    Mark(AttendanceStatus),
    Retake,
    Quit,
}

impl WalkInput {
    /// One keystroke worth of input: `p`, `a`, `r`, `q` (or the full words).
    pub fn parse(token: &str) -> AppResult<Self> {
        match token.trim().to_lowercase().as_str() {
            "r" | "retake" => Ok(WalkInput::Retake),
            "q" | "quit" => Ok(WalkInput::Quit),
            other => AttendanceStatus::parse(other).map(WalkInput::Mark),
        }
    }
}

/// Where walk inputs come from. `None` means the input is exhausted.
pub trait InputSource {
    fn next_input(&mut self, walker: &SessionWalker) -> AppResult<Option<WalkInput>>;
}

/// Pre-recorded inputs, e.g. `--marks "PAP"`.
pub struct ScriptedInput {
    inputs: std::vec::IntoIter<WalkInput>,
}

impl ScriptedInput {
    /// Parse a marks string. Letters `p`, `a`, `r`, `q` in any case;
    /// spaces and commas are ignored. The whole string is checked before
    /// anything is marked.
    pub fn parse(marks: &str) -> AppResult<Self> {
        let inputs = marks
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| {
                WalkInput::parse(&c.to_string()).map_err(|_| {
                    AppError::Validation(format!(
                        "invalid mark '{}' (use P=present, A=absent, R=retake, Q=quit)",
                        c
                    ))
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            inputs: inputs.into_iter(),
        })
    }
}

impl InputSource for ScriptedInput {
    fn next_input(&mut self, _walker: &SessionWalker) -> AppResult<Option<WalkInput>> {
        Ok(self.inputs.next())
    }
}

#[derive(Debug, Default)]
pub struct TakeOutcome {
    /// One entry per walk that reached the end of the roster.
    pub saved: Vec<HistoryEntry>,
    /// `(marked, roster size)` of a walk left unfinished, if any.
    pub abandoned: Option<(usize, usize)>,
    /// Marks ignored because the walk was already complete.
    pub ignored: usize,
}

pub struct TakeLogic;

impl TakeLogic {
    /// Load the roster, walk it, save each completed walk.
    ///
    /// A retake after completion starts a new session; the saved one is
    /// left as it is.
    pub fn run(
        pool: &mut DbPool,
        store: &HistoryStore,
        ctx: &ActiveContext,
        source: &mut dyn InputSource,
    ) -> AppResult<TakeOutcome> {
        let roster = RosterStore::list(pool, &ctx.teacher, &ctx.subject)?;
        let mut walker = SessionWalker::start(&ctx.subject, roster);
        let mut outcome = TakeOutcome::default();
        let mut finalized = false;

        if walker.is_empty() {
            warning(format!("No students on the roster for {}.", ctx.subject));
        }

        loop {
            if walker.is_complete() && !finalized {
                let entry = store.save(pool, ctx.teacher.id, &walker.finish()?)?;
                success(format!(
                    "Attendance saved (#{}): {} present, {} absent, {}%.",
                    entry.id,
                    entry.aggregates.present,
                    entry.aggregates.absent,
                    entry.aggregates.rate
                ));
                outcome.saved.push(entry);
                finalized = true;
            }

            let Some(input) = source.next_input(&walker)? else {
                break;
            };

            match input {
                WalkInput::Quit => break,
                WalkInput::Retake => {
                    walker.retake();
                    finalized = false;
                    info(format!("Retake: starting again from 1 of {}.", walker.len()));
                }
                WalkInput::Mark(status) => match walker.decide(status) {
                    Ok(_) => {}
                    Err(e) if e.is_ignorable() => {
                        warning(format!("Ignored extra mark: {}", e));
                        outcome.ignored += 1;
                    }
                    Err(e) => return Err(e),
                },
            }
        }

        if !finalized {
            warning(format!(
                "Session abandoned after {} of {} students; nothing was saved.",
                walker.position(),
                walker.len()
            ));
            outcome.abandoned = Some((walker.position(), walker.len()));
        }

        Ok(outcome)
    }
}
