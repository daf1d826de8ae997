use crate::cli::parser::{Commands, HistoryAction};
use crate::config::Config;
use crate::core::context::ContextLogic;
use crate::core::history::{HistoryQuery, HistoryStore};
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::models::history::{HistoryEntry, HistoryPage};
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{colorize_rate, colorize_status};
use crate::utils::date::{parse_day, short_timestamp};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::History { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_db(cfg)?;
    let ctx = ContextLogic::require(&mut pool)?;
    let store = HistoryStore::from_config(cfg);

    match action {
        HistoryAction::List {
            date,
            page,
            limit,
            all_subjects,
            details,
        } => {
            let subject = (!*all_subjects).then_some(ctx.subject.as_str());
            let mut q = HistoryQuery::new(subject, *page, limit.unwrap_or(cfg.page_limit));
            if let Some(d) = date {
                q = q.on(parse_day(d)?);
            }

            let res = store.query(&mut pool, ctx.teacher.id, &q)?;
            print_page(&res, subject, &cfg.separator_char, *details);
        }

        HistoryAction::Show { id } => {
            let entry = store.get(&mut pool, ctx.teacher.id, *id)?;
            print_entry(&entry, &cfg.separator_char);
        }

        HistoryAction::Export {
            format,
            file,
            date,
            all_subjects,
            force,
        } => {
            let subject = (!*all_subjects).then_some(ctx.subject.as_str());
            let day = date.as_deref().map(parse_day).transpose()?;
            ExportLogic::export(
                &mut pool,
                &store,
                ctx.teacher.id,
                subject,
                day,
                *format,
                file,
                *force,
            )?;
        }

        HistoryAction::Purge => {
            let n = store.purge(&mut pool)?;
            if n == 0 {
                info(format!(
                    "No records older than {} days.",
                    store.retention_days()
                ));
            } else {
                success(format!("🗑️ Removed {} expired records.", n));
            }
        }
    }

    Ok(())
}

fn print_page(res: &HistoryPage, subject: Option<&str>, sep: &str, details: bool) {
    let p = res.pagination;
    let scope = subject.unwrap_or("all subjects");

    if res.entries.is_empty() {
        info(format!(
            "No attendance records for {} on page {} (total {}, pages {}).",
            scope, p.page, p.total, p.total_pages
        ));
        return;
    }

    header(format!("📅 Attendance history for {}", scope));

    let mut table = Table::new(vec![
        Column::new("ID", 4),
        Column::new("SAVED", 16),
        Column::new("SUBJECT", 10),
        Column::new("TOTAL", 5),
        Column::new("PRESENT", 7),
        Column::new("ABSENT", 6),
        Column::new("RATE", 5),
    ])
    .with_separator(sep);

    for e in &res.entries {
        table.add_row(vec![
            e.id.to_string(),
            short_timestamp(&e.created_at),
            e.subject.clone(),
            e.aggregates.total.to_string(),
            e.aggregates.present.to_string(),
            e.aggregates.absent.to_string(),
            colorize_rate(e.aggregates.rate),
        ]);
    }
    print!("{}", table.render());

    println!(
        "Page {}/{} · {} records · {} per page",
        p.page, p.total_pages, p.total, p.limit
    );

    if details {
        for e in &res.entries {
            print_entry(e, sep);
        }
    }
}

fn print_entry(e: &HistoryEntry, sep: &str) {
    header(format!(
        "#{} {} · {} · {}/{} present ({})",
        e.id,
        e.subject,
        short_timestamp(&e.created_at),
        e.aggregates.present,
        e.aggregates.total,
        colorize_rate(e.aggregates.rate)
    ));

    let mut table = Table::new(vec![
        Column::new("ROLL", 6),
        Column::new("NAME", 20),
        Column::new("CLASS", 6),
        Column::new("STATUS", 7),
    ])
    .with_separator(sep);

    for m in &e.students {
        table.add_row(vec![
            m.roll_number.clone(),
            m.name.clone(),
            format!("{}-{}", m.class, m.section),
            colorize_status(m.status),
        ]);
    }
    print!("{}", table.render());
}
