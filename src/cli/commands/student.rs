use crate::cli::parser::{Commands, StudentAction};
use crate::config::Config;
use crate::core::context::ContextLogic;
use crate::core::roster::RosterStore;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::models::student::{NewStudent, Student, StudentPatch};
use crate::ui::messages::{confirm, header, info, success};
use crate::utils::colors::{CYAN, RESET};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Student { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_db(cfg)?;
    let ctx = ContextLogic::require(&mut pool)?;
    let teacher_id = ctx.teacher.id;

    match action {
        StudentAction::Add {
            name,
            roll_number,
            class,
            section,
            age,
            gender,
            photo,
        } => {
            //
            // 1. Validate input (nothing is written on failure)
            //
            let new = NewStudent::new(
                name,
                roll_number,
                class,
                section,
                *age,
                gender,
                photo.as_deref(),
                &cfg.default_photo,
            )?;

            //
            // 2. Insert
            //
            let st = RosterStore::add(&mut pool, teacher_id, &new)?;
            success(format!(
                "Added {} (roll {}) with id {}.",
                st.name, st.roll_number, st.id
            ));
        }

        StudentAction::List => {
            let roster = RosterStore::list(&mut pool, &ctx.teacher, &ctx.subject)?;
            if roster.is_empty() {
                info("No students yet: add one with `student add`.");
                return Ok(());
            }

            header(format!("Roster for {} ({} students)", ctx.subject, roster.len()));
            print!("{}", roster_table(&roster, &cfg.separator_char));
        }

        StudentAction::Show { id } => {
            let st = RosterStore::get(&mut pool, teacher_id, *id)?;
            print_card(&st);
        }

        StudentAction::Edit {
            id,
            name,
            roll_number,
            class,
            section,
            age,
            gender,
            photo,
        } => {
            let patch = StudentPatch {
                name: name.clone(),
                roll_number: roll_number.clone(),
                class: class.clone(),
                section: section.clone(),
                age: *age,
                gender: gender.clone(),
                photo: photo.clone(),
            };

            let st = RosterStore::update(&mut pool, teacher_id, *id, &patch)?;
            success(format!("✏️ Student {} updated.", st.id));
            print_card(&st);
        }

        StudentAction::Del { id, yes } => {
            let st = RosterStore::get(&mut pool, teacher_id, *id)?;

            if !*yes
                && !confirm(&format!(
                    "Remove {} (roll {}) from the roster? This action is irreversible.",
                    st.name, st.roll_number
                ))
            {
                info("Operation cancelled.");
                return Ok(());
            }

            RosterStore::remove(&mut pool, teacher_id, *id)?;
            success(format!("Student {} has been removed.", st.name));
        }
    }

    Ok(())
}

fn roster_table(roster: &[Student], sep: &str) -> String {
    let mut table = Table::new(vec![
        Column::new("#", 3),
        Column::new("ID", 4),
        Column::new("ROLL", 6),
        Column::new("NAME", 20),
        Column::new("CLASS", 6),
        Column::new("AGE", 3),
        Column::new("GENDER", 6),
    ])
    .with_separator(sep);

    for (i, st) in roster.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            st.id.to_string(),
            st.roll_number.clone(),
            st.name.clone(),
            format!("{}-{}", st.class, st.section),
            st.age.to_string(),
            st.gender.to_db_str().to_string(),
        ]);
    }

    table.render()
}

/// The "card" shown for a single student.
pub fn print_card(st: &Student) {
    println!("┌─ {}", st.name);
    println!("│ {}Roll   :{} {}", CYAN, RESET, st.roll_number);
    println!("│ {}Class  :{} {}-{}", CYAN, RESET, st.class, st.section);
    println!("│ {}Age    :{} {} years", CYAN, RESET, st.age);
    println!("│ {}Gender :{} {}", CYAN, RESET, st.gender.to_db_str());
    println!("└ {}Photo  :{} {}", CYAN, RESET, st.photo);
}
