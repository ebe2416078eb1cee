use crate::cli;
use crate::config;
use crate::credentials::{self, EnvTokenSource, TokenSource};
use crate::github::client::GitHubClient;
use crate::output;
use crate::thread;
use anyhow::Context;

pub async fn run(
    args: Vec<String>,
    stdout_additional: Option<&mut dyn std::io::Write>,
) -> anyhow::Result<()> {
    run_with_token_source(args, &EnvTokenSource::new(), stdout_additional).await
}

pub async fn run_with_token_source(
    args: Vec<String>,
    token_source: &dyn TokenSource,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
) -> anyhow::Result<()> {
    match cli::parser::parse_args(&args) {
        cli::parser::Command::Dump { issue_url } => {
            let token = credentials::require_token(token_source)?;

            let current_dir =
                std::env::current_dir().context("Failed to get current directory")?;
            let project_config = config::load_project_config(&current_dir)?;
            let settings = config::resolve_settings(
                &project_config,
                issue_url,
                std::env::var(config::API_URL_ENV_VAR).ok(),
            )?;
            tracing::debug!(?settings, "resolved settings");

            let client = GitHubClient::new(&token, &settings.api_base_url)?;
            let dumped_thread = thread::dump_issue_thread(&client, &settings.issue_url).await?;
            output::println(&dumped_thread, &mut stdout_additional)
                .context("Failed to write to stdout")?;
        }
        cli::parser::Command::Help => {
            output::println(cli::parser::USAGE, &mut stdout_additional)
                .context("Failed to write to stdout")?;
        }
        cli::parser::Command::Unknown(cmd) => {
            return Err(anyhow::anyhow!(
                "Unknown command {cmd}\n\n{}",
                cli::parser::USAGE
            ));
        }
    }
    Ok(())
}
