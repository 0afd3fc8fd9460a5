//! Script command handler.

use anyhow::Result;
use keepsake_core::script::Script;

/// Prints the built-in script, ready to be saved and edited.
pub fn print() -> Result<()> {
    print!("{}", Script::default().to_toml()?);
    Ok(())
}
