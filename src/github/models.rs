use serde::Deserialize;

/// Login GitHub shows for comments whose author account was deleted.
pub const GHOST_LOGIN: &str = "ghost";

/// Subset of the `/repos/{owner}/{repo}` response.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Repository {
    /// `owner/name`, as canonicalized by GitHub.
    pub full_name: String,
}

/// Subset of the `/repos/{owner}/{repo}/issues/{number}` response.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Issue {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    /// Number of comments GitHub reports for the issue.
    #[serde(default)]
    pub comments: u64,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub login: String,
}

/// One entry of the `/repos/{owner}/{repo}/issues/{number}/comments` response.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Comment {
    pub user: Option<User>,
    pub body: Option<String>,
}

impl Comment {
    pub fn author_login(&self) -> &str {
        self.user
            .as_ref()
            .map(|user| user.login.as_str())
            .unwrap_or(GHOST_LOGIN)
    }

    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}
