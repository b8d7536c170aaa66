//! Command parsing for the command line

/// Parsed command from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Quit the application: :q or :quit
    Quit,
    /// Show help: :help or :h
    Help,
    /// Navigate to a path: :open /chapter/3
    Open(String),
    /// Return to the previous view: :back
    Back,
    /// Go to the unit list and clear history: :home
    Home,
    /// Re-activate the current view: :reload
    Reload,
    /// Open the quiz for the current chapter: :quiz
    Quiz,
    /// Read the current chapter aloud: :speak
    Speak,
    /// Score the current quiz: :submit
    Submit,
    /// Clear message: (empty command)
    Nop,
}

/// Result of parsing a command
#[derive(Debug)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Unknown command
    UnknownCommand(String),
    /// Command needs an argument
    MissingArgument(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Ok(Command::Nop);
    }

    let mut parts = input.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim()).unwrap_or("");

    match cmd.to_lowercase().as_str() {
        "quit" | "q" => ParseResult::Ok(Command::Quit),
        "help" | "h" | "?" => ParseResult::Ok(Command::Help),
        "open" | "o" | "go" => {
            if args.is_empty() {
                ParseResult::MissingArgument("open".to_string())
            } else {
                ParseResult::Ok(Command::Open(args.to_string()))
            }
        }
        "back" | "b" => ParseResult::Ok(Command::Back),
        "home" => ParseResult::Ok(Command::Home),
        "reload" | "r" => ParseResult::Ok(Command::Reload),
        "quiz" | "mcq" => ParseResult::Ok(Command::Quiz),
        "speak" | "tts" => ParseResult::Ok(Command::Speak),
        "submit" => ParseResult::Ok(Command::Submit),
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}
