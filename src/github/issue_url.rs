use reqwest::Url;
use thiserror::Error;

/// Host every issue URL must point at.
const GITHUB_HOST: &str = "github.com";

/// A GitHub issue decoded from its web URL.
///
/// `https://github.com/Expensify/App/issues/29886` becomes
/// `repository_name = "Expensify/App"` and `issue_number = 29886`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueUrl {
    pub repository_name: String,
    pub issue_number: u64,
}

/// Returned when a string is not a usable GitHub issue URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid issue URL: {0}")]
pub struct InvalidIssueUrl(pub String);

/// Parses `https://github.com/<owner>/<repo>/issues/<number>`.
///
/// # Returns
///
/// * `Ok(IssueUrl)` if the host is `github.com`, the path has exactly five
///   `/`-separated segments and the last one is a positive `i32`.
/// * `Err(InvalidIssueUrl)` otherwise, carrying the original input.
///
/// Host and path are checked as written: `Url::parse` only decides whether
/// the input is a URL at all, its normalized form (lowercased host, resolved
/// `..` segments) is not used.
pub fn parse_issue_url(url_string: &str) -> Result<IssueUrl, InvalidIssueUrl> {
    let invalid = || InvalidIssueUrl(url_string.to_string());

    Url::parse(url_string).map_err(|_| invalid())?;
    let (host, path) = split_host_and_path(url_string).ok_or_else(invalid)?;

    if host != GITHUB_HOST {
        return Err(invalid());
    }

    let path_parts: Vec<&str> = path.split('/').collect();
    if path_parts.len() != 5 {
        return Err(invalid());
    }

    let issue_number = path_parts[4]
        .parse::<i32>()
        .ok()
        .filter(|number| *number > 0)
        .ok_or_else(invalid)?;

    Ok(IssueUrl {
        repository_name: format!("{}/{}", path_parts[1], path_parts[2]),
        issue_number: issue_number as u64,
    })
}

/// Splits `scheme://[userinfo@]host[:port]/path[?query][#fragment]` into the
/// raw host and path, without any normalization.
fn split_host_and_path(url_string: &str) -> Option<(&str, &str)> {
    let (_, rest) = url_string.split_once("://")?;
    let rest = match rest.find(&['?', '#'][..]) {
        Some(end) => &rest[..end],
        None => rest,
    };
    let (authority, path) = match rest.find('/') {
        Some(start) => rest.split_at(start),
        None => (rest, ""),
    };
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    let host = host_port.split_once(':').map_or(host_port, |(host, _)| host);
    Some((host, path))
}
