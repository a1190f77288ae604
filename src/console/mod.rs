//! Interactive terminal front ends.
//!
//! The top-level menu dispatches to one of three role sessions, each a thin
//! adapter over [`crate::domain`]. Sessions run in-process and return to the
//! top-level menu on logout.

mod common;
mod employee;
mod hr;
mod io;
mod manager;
mod state;
mod table;

pub use io::Console;
pub use state::AppState;
pub use table::{render_bar_chart, render_table};

use std::io::{BufRead, Write};

use tracing::info;

use crate::clock::Clock;
use crate::error::{EmsError, EmsResult};
use crate::store::Store;

/// A role selectable from the top-level menu or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Role {
    /// Human resources staff.
    Hr,
    /// A regular employee.
    Employee,
    /// The manager.
    Manager,
}

/// Runs one session for `role`.
pub async fn run_role<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
    role: Role,
) -> EmsResult<()> {
    info!(?role, "Starting session");
    match role {
        Role::Hr => hr::run(state, console).await,
        Role::Employee => employee::run(state, console).await,
        Role::Manager => manager::run(state, console).await,
    }
}

/// Runs the top-level menu until Exit or end of input.
///
/// With `role` set, runs that session once and returns.
pub async fn run_app<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
    role: Option<Role>,
) -> EmsResult<()> {
    let outcome = match role {
        Some(role) => run_role(state, console, role).await,
        None => top_menu(state, console).await,
    };
    match outcome {
        Err(EmsError::InputClosed) => {
            info!("Input closed");
            Ok(())
        }
        other => other,
    }
}

async fn top_menu<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    loop {
        let choice = console.menu(
            "Employee Management System",
            &["HR", "Employee", "Manager", "Exit"],
        )?;
        let result = match choice.as_str() {
            "1" => run_role(state, console, Role::Hr).await,
            "2" => run_role(state, console, Role::Employee).await,
            "3" => run_role(state, console, Role::Manager).await,
            "4" => return console.info("Goodbye!"),
            _ => console.error("Invalid choice. Please try again."),
        };
        console.settle(result)?;
    }
}
