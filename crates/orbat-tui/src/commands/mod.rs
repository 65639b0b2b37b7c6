// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{app::AppState, theme::Theme};
use orbat_core::Side;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the app
    Quit,
    // Display help
    Help,
    // Change theme
    Theme(String),
    // Switch to compact display
    Compact,
    // Switch to detail display
    Details,
    // Clear the query
    Reset,
    // Move the tree cursor to a root by its jump index
    Jump(usize),
    // Load the other catalogue
    Side(Side),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "compact" => Ok(Command::Compact),
            "details" => Ok(Command::Details),
            "reset" => Ok(Command::Reset),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "jump" => rest
                .parse::<usize>()
                .map(Command::Jump)
                .map_err(|_| "usage: jump <n>".to_string()),
            "side" => rest
                .parse::<Side>()
                .map(Command::Side)
                .map_err(|_| "usage: side <ua|ru>".to_string()),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
///
/// Returns an error message to show in the command bar when the command
/// could not be carried out.
pub fn execute_command(s: &mut AppState, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name);
        }
        Command::Compact => s.set_compact(true),
        Command::Details => s.set_compact(false),
        Command::Reset => s.reset_query(),
        Command::Jump(n) => {
            if !s.jump_to(n) {
                return Err(format!("no unit at cat-{n}"));
            }
        }
        Command::Side(side) => {
            s.switch_side(side).map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}
