use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::context::ContextLogic;
use crate::core::dashboard::DashboardLogic;
use crate::core::history::HistoryStore;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREY, RESET, colorize_rate};
use crate::utils::date::short_timestamp;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Stats) {
        return Ok(());
    }

    let mut pool = open_db(cfg)?;
    let ctx = ContextLogic::require(&mut pool)?;
    let store = HistoryStore::from_config(cfg);

    let stats = DashboardLogic::stats(&store, &mut pool, ctx.teacher.id)?;

    header(format!("📊 Dashboard for {}", ctx.teacher.name));
    println!("{}• Students:{} {}", CYAN, RESET, stats.total_students);
    println!(
        "{}• Records ({} days):{} {}",
        CYAN,
        store.retention_days(),
        RESET,
        stats.total_records
    );
    println!(
        "{}• Average rate (7 days):{} {}",
        CYAN,
        RESET,
        colorize_rate(stats.average_rate_7d)
    );

    println!("{}• Recent:{}", CYAN, RESET);
    if stats.recent.is_empty() {
        println!("    {GREY}No recent records found{RESET}");
    }
    for e in &stats.recent {
        println!(
            "    {} {:<10} {} present, {} absent  {}",
            short_timestamp(&e.created_at),
            e.subject,
            e.aggregates.present,
            e.aggregates.absent,
            colorize_rate(e.aggregates.rate)
        );
    }

    Ok(())
}
