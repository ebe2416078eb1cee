/// Enum representing CLI commands
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Dump a thread; `None` means use the configured or default issue URL.
    Dump { issue_url: Option<String> },
    Help,
    Unknown(String),
}

/// Usage text printed for `help` and unknown commands.
pub const USAGE: &str = "Usage: dump-issue-thread [<issue-url>]

Prints the comment thread of a GitHub issue.

Arguments:
  <issue-url>  https://github.com/<owner>/<repo>/issues/<number>

Environment:
  GITHUB_PERSONAL_TOKEN  personal access token (required)
  GITHUB_API_URL         GitHub API base URL (default: https://api.github.com)";

/// Parse command line arguments and return a Command
///
/// # Arguments
/// * `args` - Command line arguments (including program name)
///
/// # Returns
/// * `Command` - The parsed command
pub fn parse_args(args: &[String]) -> Command {
    match args.len() {
        0 | 1 => Command::Dump { issue_url: None },
        2 => match args[1].as_str() {
            "help" | "-h" | "--help" => Command::Help,
            arg if arg.starts_with('-') => Command::Unknown(arg.to_string()),
            url => Command::Dump {
                issue_url: Some(url.to_string()),
            },
        },
        _ => Command::Unknown(args[1..].join(" ")),
    }
}
