use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::context::ContextLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::{CYAN, RESET};

/// Handle `login`, `logout`, `whoami` and `subject`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let mut pool = open_db(cfg)?;

    match cmd {
        Commands::Login { name, subject } => {
            let ctx = ContextLogic::login(&mut pool, name, subject)?;
            success(format!(
                "Welcome {}! Taking attendance for {}.",
                ctx.teacher.name, ctx.subject
            ));
        }
        Commands::Logout => {
            if ContextLogic::logout(&mut pool)? {
                success("Logged out.");
            } else {
                info("Nobody was logged in.");
            }
        }
        Commands::Whoami => match ContextLogic::current(&mut pool)? {
            Some(ctx) => {
                println!("{}Teacher :{} {} <{}>", CYAN, RESET, ctx.teacher.name, ctx.teacher.email);
                println!("{}Subject :{} {}", CYAN, RESET, ctx.subject);
                println!("{}Subjects:{} {}", CYAN, RESET, ctx.teacher.subjects.join(", "));
            }
            None => info("Not logged in."),
        },
        Commands::Subject { name, add } => {
            let ctx = ContextLogic::switch_subject(&mut pool, name, *add)?;
            success(format!("Active subject: {}.", ctx.subject));
        }
        _ => {}
    }

    Ok(())
}
