use crate::cli::commands::student::print_card;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::context::ContextLogic;
use crate::core::history::HistoryStore;
use crate::core::take::{InputSource, ScriptedInput, TakeLogic, WalkInput};
use crate::core::walker::SessionWalker;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::{error, header, prompt_line};
use crate::utils::colors::colorize_rate;
use crate::utils::formatting::{progress, rate_bar};

/// Keyboard-driven walk: one line per student.
struct InteractiveInput;

impl InputSource for InteractiveInput {
    fn next_input(&mut self, walker: &SessionWalker) -> AppResult<Option<WalkInput>> {
        let Some(student) = walker.current() else {
            // walk finished, nothing more to ask
            return Ok(None);
        };

        header(progress(walker.position(), walker.len()));
        print_card(student);

        loop {
            let Some(line) = prompt_line("[p]resent / [a]bsent / [r]etake / [q]uit > ")? else {
                return Ok(None);
            };
            match WalkInput::parse(&line) {
                Ok(input) => return Ok(Some(input)),
                Err(e) => error(e),
            }
        }
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Take { marks } = cmd {
        // marks are validated before the roster is even loaded
        let mut scripted = marks.as_deref().map(ScriptedInput::parse).transpose()?;

        let mut pool = open_db(cfg)?;
        let ctx = ContextLogic::require(&mut pool)?;
        let store = HistoryStore::from_config(cfg);

        let mut interactive = InteractiveInput;
        let source: &mut dyn InputSource = match scripted.as_mut() {
            Some(s) => s,
            None => &mut interactive,
        };

        let outcome = TakeLogic::run(&mut pool, &store, &ctx, source)?;

        for entry in &outcome.saved {
            header(format!("Summary #{} · {}", entry.id, entry.subject));
            println!("Total   : {}", entry.aggregates.total);
            println!("Present : {}", entry.aggregates.present);
            println!("Absent  : {}", entry.aggregates.absent);
            println!(
                "Rate    : {} {}",
                colorize_rate(entry.aggregates.rate),
                rate_bar(entry.aggregates.rate, 20)
            );
        }
    }

    Ok(())
}
