//! Command line parsing for the interactive shell
//!
//! Each input line is parsed as one clap subcommand. A bare number is a
//! shortcut for a home screen suggestion and never reaches clap.

use clap::{CommandFactory, Parser, Subcommand};

/// One line of input
#[derive(Parser, Debug)]
#[command(
    name = "vantage",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true,
    after_help = "A bare number picks that suggestion on the home screen."
)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

/// A parsed user command
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Find deals for a product
    #[command(alias = "s")]
    Search {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },
    /// Re-run the last search
    Retry,
    /// Back to the search screen
    Home,
    /// Save a result to your cart
    Save {
        /// Result number
        n: usize,
    },
    /// Remove an item from your cart
    #[command(alias = "rm")]
    Remove {
        /// Cart item number
        n: usize,
    },
    /// Open your cart
    Cart,
    /// Close the cart or sign-in panel
    Close,
    /// Sign in
    Login { username: String, password: String },
    /// Create an account
    Signup {
        username: String,
        password: String,
        #[arg(required = true, trailing_var_arg = true)]
        name: Vec<String>,
    },
    /// Sign out
    Logout,
    /// Show this help
    #[command(alias = "?")]
    Help,
    /// Exit
    #[command(aliases = ["exit", "q"])]
    Quit,
}

/// What a line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Pick one of the home screen suggestions (1-based)
    Suggestion(usize),
    Command(Command),
}

impl From<Command> for Input {
    fn from(command: Command) -> Self {
        Input::Command(command)
    }
}

/// Help text listing every command
pub fn help() -> String {
    Line::command().render_help().to_string()
}

/// Parse one input line. Empty input yields `Ok(None)`; errors carry
/// clap's usage message.
pub fn parse(line: &str) -> Result<Option<Input>, String> {
    let mut words: Vec<String> = line.split_whitespace().map(String::from).collect();
    match words.as_slice() {
        [] => return Ok(None),
        [only] => {
            if let Ok(n) = only.parse::<usize>() {
                return Ok(Some(Input::Suggestion(n)));
            }
        }
        _ => {}
    }
    // Command names are matched case-insensitively
    words[0] = words[0].to_lowercase();

    Line::try_parse_from(words)
        .map(|parsed| Some(Input::Command(parsed.command)))
        .map_err(|e| e.to_string().trim_end().to_string())
}
