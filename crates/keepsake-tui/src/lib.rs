//! Full-screen TUI for the keepsake presentation.

pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use keepsake_core::interrupt::{self, InterruptedError};
use keepsake_core::script::Script;
use keepsake_core::session::Session;
use keepsake_core::timing::Timing;
pub use runtime::TuiRuntime;
use tracing::info;

use crate::state::AppState;

/// Plays the presentation until the viewer quits.
pub async fn run_presentation(script: Script, timing: Timing, haptics: bool) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The presentation requires a terminal.\n\
             Use `keepsake rehearse` to print the timeline instead."
        );
    }

    let (session, mounted) = Session::new(script, timing);
    for event in &mounted {
        info!(%event, "mounted");
    }

    let mut runtime = TuiRuntime::new(AppState::new(session, haptics))?;
    runtime.run()?;
    let finished = runtime.state.finished;
    drop(runtime);

    // Terminal is restored once the runtime is dropped.
    let line = farewell(finished, interrupt::is_interrupted())?;
    writeln!(stderr(), "{line}")?;

    Ok(())
}

/// The line printed after the presentation, or [`InterruptedError`] after Ctrl+C.
fn farewell(finished: bool, interrupted: bool) -> Result<&'static str> {
    if interrupted {
        return Err(InterruptedError.into());
    }
    Ok(if finished { "The end." } else { "Goodbye!" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_farewell_after_quit_or_finish() {
        assert_eq!(farewell(true, false).unwrap(), "The end.");
        assert_eq!(farewell(false, false).unwrap(), "Goodbye!");
    }

    #[test]
    fn test_ctrl_c_ends_with_interrupted_error() {
        let err = farewell(false, true).unwrap_err();
        assert!(err.downcast_ref::<InterruptedError>().is_some());
    }
}
