use crate::{DumpWorld, MockApi};
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// API base used when a scenario sets up no mock; nothing listens there.
const UNREACHABLE_API_URL: &str = "http://127.0.0.1:9";

async fn mock_api(world: &mut DumpWorld) -> &MockServer {
    if world.mock_api.is_none() {
        world.mock_api = Some(MockApi(MockServer::start().await));
    }
    &world.mock_api.as_ref().expect("mock API was just started").0
}

async fn mount_issue(server: &MockServer, repository: &str, number: u64, comments: serde_json::Value) {
    let comment_count = comments.as_array().map_or(0, Vec::len);

    Mock::given(method("GET"))
        .and(path(format!("/repos/{repository}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "full_name": repository })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/repos/{repository}/issues/{number}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": number,
            "title": "Acceptance test issue",
            "comments": comment_count
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/repos/{repository}/issues/{number}/comments")))
        .respond_with(ResponseTemplate::new(200).set_body_json(comments))
        .mount(server)
        .await;
}

#[given(regex = r#"^the GitHub API has issue ([^#\s]+)#(\d+) with comments:$"#)]
async fn given_issue_with_comments(
    world: &mut DumpWorld,
    repository: String,
    number: u64,
    step: &Step,
) {
    let table = step
        .table
        .as_ref()
        .expect("Expected a table of login | body rows");
    let comments: Vec<serde_json::Value> = table
        .rows
        .iter()
        .skip(1)
        .map(|row| json!({ "user": { "login": row[0] }, "body": row[1] }))
        .collect();

    let server = mock_api(world).await;
    mount_issue(server, &repository, number, json!(comments)).await;
}

#[given(regex = r#"^the GitHub API has issue ([^#\s]+)#(\d+) with no comments$"#)]
async fn given_issue_without_comments(world: &mut DumpWorld, repository: String, number: u64) {
    let server = mock_api(world).await;
    mount_issue(server, &repository, number, json!([])).await;
}

#[given(regex = r#"^the GitHub API has no repository (\S+)$"#)]
async fn given_missing_repository(world: &mut DumpWorld, repository: String) {
    let server = mock_api(world).await;
    Mock::given(method("GET"))
        .and(path(format!("/repos/{repository}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(server)
        .await;
}

fn run_binary(world: &mut DumpWorld, args: &str, token: Option<&str>) {
    let work_dir = tempfile::tempdir().expect("Failed to create working directory");
    let api_url = world
        .mock_api
        .as_ref()
        .map(|api| api.0.uri())
        .unwrap_or_else(|| UNREACHABLE_API_URL.to_string());

    let mut command = std::process::Command::new(env!("CARGO_BIN_EXE_dump-issue-thread"));
    command
        .args(args.split_whitespace())
        .current_dir(work_dir.path())
        .env("GITHUB_API_URL", api_url)
        .env_remove("RUST_LOG");
    match token {
        Some(token) => command.env("GITHUB_PERSONAL_TOKEN", token),
        None => command.env_remove("GITHUB_PERSONAL_TOKEN"),
    };

    let output = command
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute dump-issue-thread: {}", e));
    world.captured_output = output.stdout;
    world.captured_error = output.stderr;
    world.command_status = Some(output.status);
}

#[when(regex = r#"^I run `dump-issue-thread ?([^`]*)`$"#)]
async fn when_run(world: &mut DumpWorld, args: String) {
    run_binary(world, &args, Some("test-token"));
}

#[when(regex = r#"^I run `dump-issue-thread ?([^`]*)` without a token$"#)]
async fn when_run_without_token(world: &mut DumpWorld, args: String) {
    run_binary(world, &args, None);
}

fn assert_succeeded(world: &DumpWorld) {
    assert!(
        world.command_status.is_some_and(|s| s.success()),
        "Command failed with status {:?}, stderr:\n---\n{}\n---",
        world.command_status,
        String::from_utf8_lossy(&world.captured_error)
    );
}

#[then("the output should be:")]
async fn then_output_should_be(world: &mut DumpWorld, step: &Step) {
    let expected = step
        .docstring
        .as_ref()
        .expect("Expected docstring with the expected output");
    let output = String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8");

    assert_succeeded(world);
    assert_eq!(
        output.trim(),
        expected.trim(),
        "Expected output '{}', but got:\n---\n{}\n---",
        expected.trim(),
        output
    );
}

#[then("the output should be empty")]
async fn then_output_should_be_empty(world: &mut DumpWorld) {
    let output = String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8");

    assert_succeeded(world);
    assert!(
        output.trim().is_empty(),
        "Expected output to be empty, but got:\n---\n{}\n---",
        output
    );
}

#[then(regex = r#"^the output should start with "(.*)"$"#)]
async fn then_output_should_start_with(world: &mut DumpWorld, expected: String) {
    let output = String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8");

    assert_succeeded(world);
    assert!(
        output.starts_with(&expected),
        "Expected output to start with '{}', but got:\n---\n{}\n---",
        expected,
        output
    );
}

#[then(regex = r#"^the error should contain "(.*)"$"#)]
async fn then_error_should_contain(world: &mut DumpWorld, expected: String) {
    let error = String::from_utf8(world.captured_error.clone()).expect("Invalid UTF-8");

    assert!(
        world.command_status.is_none_or(|s| !s.success()),
        "Command should have failed but succeeded with status: {:?}",
        world.command_status
    );
    assert!(
        world.captured_output.is_empty(),
        "Nothing should be printed on stdout on failure, got:\n---\n{}\n---",
        String::from_utf8_lossy(&world.captured_output)
    );
    assert!(
        error.contains(&expected),
        "Expected error containing '{}', but got:\n---\n{}\n---",
        expected,
        error
    );
}
