use crate::github::client::IssueApi;
use crate::github::issue_url::parse_issue_url;
use crate::github::models::Comment;
use anyhow::Result;

/// Renders comments as `<login>:\n\n<body>` blocks separated by a blank line.
///
/// Comment text is written as-is; a body that itself contains blank lines is
/// not escaped.
pub fn format_issue_thread(comments: &[Comment]) -> String {
    comments
        .iter()
        .map(|comment| format!("{}:\n\n{}", comment.author_login(), comment.body_text()))
        .collect::<Vec<String>>()
        .join("\n\n")
}

/// Fetches the issue behind `issue_url` and renders its comment thread.
///
/// Fails with [`InvalidIssueUrl`](crate::github::issue_url::InvalidIssueUrl)
/// before any request is made if the URL is not a GitHub issue URL. API
/// errors are returned as the client reported them.
pub async fn dump_issue_thread<A: IssueApi>(api: &A, issue_url: &str) -> Result<String> {
    let issue_url = parse_issue_url(issue_url)?;

    let repository = api.get_repository(&issue_url.repository_name).await?;
    let issue = api.get_issue(&repository, issue_url.issue_number).await?;
    tracing::info!(
        repository = %repository.full_name,
        number = issue.number,
        title = %issue.title,
        comments = issue.comments,
        "fetched issue"
    );

    let comments = api.list_comments(&repository, &issue).await?;
    Ok(format_issue_thread(&comments))
}
