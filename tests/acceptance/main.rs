use cucumber::World;
use std::process::ExitStatus;

/// Mock GitHub API kept alive for the duration of a scenario.
pub struct MockApi(pub wiremock::MockServer);

impl std::fmt::Debug for MockApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MockApi").field(&self.0.uri()).finish()
    }
}

#[derive(Debug, Default, World)]
pub struct DumpWorld {
    pub captured_output: Vec<u8>,
    pub captured_error: Vec<u8>,
    pub command_status: Option<ExitStatus>,
    pub mock_api: Option<MockApi>,
}

#[tokio::main]
async fn main() {
    DumpWorld::run("features").await;
}

mod steps;
