use std::io::{BufRead, Write};

use tracing::{info, info_span};

use crate::account::Account;
use crate::auth;
use crate::console::Console;
use crate::error::Result;
use crate::roles;
use crate::state::AppState;

pub const EXIT_PROMPT: &str = "Do you want to exit the program? (yes/no): ";
pub const INVALID_ANSWER: &str = "Invalid choice, please enter 'yes' or 'no'.";

/// What the user chose at logout.
#[derive(Debug)]
pub enum Logout {
    /// The store has been committed and closed; the caller must stop.
    Exit,
    /// Result of the fresh login attempt.
    Login(Option<Account>),
}

pub fn logout<R: BufRead, W: Write>(
    state: &mut AppState,
    console: &mut Console<R, W>,
) -> Result<Logout> {
    loop {
        let answer = console.prompt(EXIT_PROMPT)?;
        let answer = answer.trim();
        if answer.eq_ignore_ascii_case("yes") {
            console.say("Exiting the program...")?;
            state.close()?;
            return Ok(Logout::Exit);
        }
        if answer.eq_ignore_ascii_case("no") {
            console.say("Logging out...")?;
            return Ok(Logout::Login(auth::login(state, console)?));
        }
        console.say(INVALID_ANSWER)?;
    }
}

/// Top-level console loop: sign in, serve the role menu, then log out.
///
/// Returns once the user exits; the store is closed by then.
pub fn run<R: BufRead, W: Write>(state: &mut AppState, console: &mut Console<R, W>) -> Result<()> {
    let mut current = auth::login(state, console)?;
    loop {
        let Some(mut account) = current.take() else {
            current = auth::login(state, console)?;
            continue;
        };

        {
            let span = info_span!("session", role = %account.role(), email = %account.email());
            let _entered = span.enter();
            roles::run_menu(state, console, &mut account)?;
            info!(
                scheduled = account.schedule().map_or(0, |s| s.len()),
                "menu closed"
            );
        }

        match logout(state, console)? {
            Logout::Exit => return Ok(()),
            Logout::Login(next) => current = next,
        }
    }
}
