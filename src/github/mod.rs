pub mod client;
pub mod issue_url;
pub mod models;
