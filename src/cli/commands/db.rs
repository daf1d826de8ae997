use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{applied_migrations, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success, warning};
use std::fs;

/// Handle `db`. Flags run in a fixed order: migrate, info, check, vacuum.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    if !(*migrate || *check || *vacuum || *show_info) {
        info("Nothing to do: use --migrate, --info, --check or --vacuum.");
        return Ok(());
    }

    let mut pool = DbPool::new(&cfg.database)?;

    if *migrate {
        migrate_schema(&pool)?;
    }
    if *show_info {
        stats::print_db_info(&mut pool, &cfg.database)?;
    }
    if *check {
        check_integrity(&pool)?;
    }
    if *vacuum {
        compact(&pool, &cfg.database)?;
    }

    Ok(())
}

fn migrate_schema(pool: &DbPool) -> AppResult<()> {
    header("Schema migrations");
    run_pending_migrations(&pool.conn)?;

    let versions = applied_migrations(&pool.conn)?;
    if versions.is_empty() {
        info("No versioned migrations recorded.");
    }
    for v in versions {
        println!("  • {}", v);
    }
    success("Schema is up to date.");
    Ok(())
}

/// `integrity_check` plus the foreign key audit; both report every problem row.
fn check_integrity(pool: &DbPool) -> AppResult<()> {
    header("Integrity check");

    let integrity: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

    let mut stmt = pool.conn.prepare("PRAGMA foreign_key_check;")?;
    let orphans = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if integrity == "ok" && orphans.is_empty() {
        success("Integrity check passed.");
    } else {
        if integrity != "ok" {
            warning(format!("Integrity check failed: {}", integrity));
        }
        for table in orphans {
            warning(format!("Dangling reference in table '{}'", table));
        }
    }
    Ok(())
}

fn compact(pool: &DbPool, path: &str) -> AppResult<()> {
    let size = || fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    let before = size();
    pool.conn.execute_batch("VACUUM;")?;
    let after = size();

    success(format!(
        "Vacuum completed: {} → {} bytes.",
        before, after
    ));
    Ok(())
}
