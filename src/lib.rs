pub mod cli;
pub mod config;
pub mod credentials;
pub mod github;
pub mod output;
pub mod run;
pub mod thread;
