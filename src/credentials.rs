use anyhow::Result;

/// Environment variable holding the GitHub personal access token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_PERSONAL_TOKEN";

/// Abstract token lookup interface
pub trait TokenSource {
    /// Return the token. If none is available, returns Ok(None)
    fn load(&self) -> Result<Option<String>>;
}

/// Reads the token from an environment variable
pub struct EnvTokenSource {
    var_name: &'static str,
}

impl EnvTokenSource {
    pub fn new() -> Self {
        EnvTokenSource {
            var_name: TOKEN_ENV_VAR,
        }
    }
}

impl Default for EnvTokenSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSource for EnvTokenSource {
    fn load(&self) -> Result<Option<String>> {
        match std::env::var(self.var_name) {
            Ok(token) => Ok(Some(token)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(anyhow::anyhow!(
                "{} environment variable is not valid UTF-8",
                self.var_name
            )),
        }
    }
}

/// Loads the token, failing if the source has none.
pub fn require_token(source: &dyn TokenSource) -> Result<String> {
    source
        .load()?
        .ok_or_else(|| anyhow::anyhow!("{TOKEN_ENV_VAR} environment variable not set"))
}
