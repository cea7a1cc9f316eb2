pub mod admin;
pub mod enrollment;

use std::io::{BufRead, Write};

use crate::account::Account;
use crate::console::Console;
use crate::courses;
use crate::error::Result;
use crate::state::AppState;

const ADMIN_MENU: &[&str] = &[
    "1. Search courses",
    "2. Add course",
    "3. Remove course",
    "4. Print roster",
    "5. My info",
    "6. Log out",
];

const MEMBER_MENU: &[&str] = &[
    "1. Search courses",
    "2. Add course to schedule",
    "3. Drop course from schedule",
    "4. Print schedule",
    "5. My info",
    "6. Log out",
];

/// Serve the signed-in account's menu until it chooses to log out.
pub fn run_menu<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
    account: &mut Account,
) -> Result<()> {
    loop {
        console.say(&format!("----- {} Menu -----", account.role().title()))?;
        let items = match account {
            Account::Admin(_) => ADMIN_MENU,
            Account::Instructor(_) | Account::Student(_) => MEMBER_MENU,
        };
        for item in items {
            console.say(item)?;
        }
        let choice = console.prompt("Enter your choice: ")?;
        if !dispatch(state, console, account, choice.trim())? {
            return Ok(());
        }
    }
}

/// Returns `false` once the account logs out.
fn dispatch<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
    account: &mut Account,
    choice: &str,
) -> Result<bool> {
    match choice {
        "1" => courses::search_course(state, console)?,
        "2" | "3" | "4" => match account.schedule_mut() {
            None => match choice {
                "2" => admin::add_remove_course(state, console, true)?,
                "3" => admin::add_remove_course(state, console, false)?,
                _ => admin::print_roster(state, console)?,
            },
            Some(schedule) => match choice {
                "2" => enrollment::add_drop_course(state, console, schedule, true)?,
                "3" => enrollment::add_drop_course(state, console, schedule, false)?,
                _ => enrollment::print_schedule(state, console, schedule)?,
            },
        },
        "5" => console.say(&account.to_string())?,
        "6" => return Ok(false),
        _ => console.say("Invalid choice.")?,
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{authenticate, seed_accounts};
    use crate::console::{scripted, transcript};
    use crate::courses::{insert_course, sample_course};
    use crate::error::RegistrarError;
    use crate::state::test_state;

    fn signed_in(email: &str, id: &str) -> (AppState, Account) {
        let state = test_state();
        let conn = state.conn().unwrap();
        seed_accounts(conn);
        insert_course(conn, &sample_course("1001", "Calculus")).unwrap();
        let account = authenticate(conn, email, id).unwrap().expect("account");
        (state, account)
    }

    #[test]
    fn student_menu_adds_and_prints_schedule() {
        let (state, mut account) = signed_in("student@example.com", "3");
        let mut console = scripted(&["2", "1001", "4", "6"]);
        run_menu(&state, &mut console, &mut account).unwrap();

        let out = transcript(console);
        assert!(out.starts_with("----- Student Menu -----\n1. Search courses\n"));
        assert!(out.contains("Course 1001 added to your schedule.\n"));
        assert!(out.contains(
            "----- Schedule -----\n('1001', 'Calculus', 'MATH', '9:00-10:00', 'MWF', 'Fall', 2026, 4)\n"
        ));
        assert!(account.schedule().unwrap().contains("1001"));
    }

    #[test]
    fn instructor_menu_drops_course() {
        let (state, mut account) = signed_in("instructor@example.com", "2");
        account.schedule_mut().unwrap().add("1001");
        let mut console = scripted(&["3", "1001", "6"]);
        run_menu(&state, &mut console, &mut account).unwrap();
        assert!(transcript(console).contains("Course 1001 dropped from your schedule.\n"));
        assert!(account.schedule().unwrap().is_empty());
    }

    #[test]
    fn admin_menu_reaches_catalog_operations() {
        let (state, mut account) = signed_in("admin@example.com", "1");
        let mut console = scripted(&["4", "3", "1001", "yes", "4", "5", "6"]);
        run_menu(&state, &mut console, &mut account).unwrap();

        let out = transcript(console);
        assert!(out.contains("----- Admin Menu -----\n"));
        assert!(out.contains("Course 1001 removed.\n"));
        assert!(out.contains(
            "Admin: Ada Lovelace (ID 1, admin@example.com), Registrar, office Dobbs 101\n"
        ));
        assert!(out.contains("----- Courses -----\n----- Admin Menu -----"));
    }

    #[test]
    fn unknown_choice_reprompts() {
        let (state, mut account) = signed_in("student@example.com", "3");
        let mut console = scripted(&["9", "6"]);
        run_menu(&state, &mut console, &mut account).unwrap();
        let out = transcript(console);
        assert!(out.contains("Invalid choice.\n----- Student Menu -----"));
    }

    #[test]
    fn end_of_input_surfaces_as_input_closed() {
        let (state, mut account) = signed_in("student@example.com", "3");
        let mut console = scripted(&["1"]);
        let err = run_menu(&state, &mut console, &mut account).unwrap_err();
        assert!(matches!(err, RegistrarError::InputClosed));
    }
}
