// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    missing_doc_code_examples,
    private_doc_tests,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod api;
mod command;
mod config;
mod error;
mod metadata;
mod model;
mod password;
mod router;
mod session;
mod storage;
mod transport;

use std::{process, sync::Arc, time::Duration};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use config::{Config, RolePolicy};
use error::{Error, Result};
use log::{debug, error};
use session::Session;
use transport::Transport;
use url::Url;

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch a login captcha.
    Captcha(command::auth::Captcha),
    Login(command::auth::SignIn),
    Logout(command::auth::SignOut),
    Whoami(command::auth::Whoami),
    Refresh(command::auth::Refresh),
    ResetPassword(command::auth::RequestReset),
    ChangePassword(command::auth::ChangeOwnPassword),
    #[command(subcommand)]
    Application(command::school::Application),
    #[command(subcommand)]
    School(command::school::School),
    #[command(subcommand)]
    Assessment(command::assessment::Assessment),
    #[command(subcommand)]
    Survey(command::survey::Survey),
    #[command(subcommand)]
    Admin(command::admin::Admin),
    #[command(subcommand)]
    Region(command::region::Region),
    #[command(subcommand)]
    News(command::news::News),
    #[command(subcommand)]
    Content(command::news::Content),
    Navigate(command::navigate::Navigate),
    Routes(command::navigate::Routes),
    Legend(command::legend::Legend),
}

#[async_trait]
impl command::Command for Command {
    async fn execute(self, transport: &Transport) -> Result<()> {
        match self {
            Self::Captcha(cmd) => cmd.execute(transport).await,
            Self::Login(cmd) => cmd.execute(transport).await,
            Self::Logout(cmd) => cmd.execute(transport).await,
            Self::Whoami(cmd) => cmd.execute(transport).await,
            Self::Refresh(cmd) => cmd.execute(transport).await,
            Self::ResetPassword(cmd) => cmd.execute(transport).await,
            Self::ChangePassword(cmd) => cmd.execute(transport).await,
            Self::Application(cmd) => cmd.execute(transport).await,
            Self::School(cmd) => cmd.execute(transport).await,
            Self::Assessment(cmd) => cmd.execute(transport).await,
            Self::Survey(cmd) => cmd.execute(transport).await,
            Self::Admin(cmd) => cmd.execute(transport).await,
            Self::Region(cmd) => cmd.execute(transport).await,
            Self::News(cmd) => cmd.execute(transport).await,
            Self::Content(cmd) => cmd.execute(transport).await,
            Self::Navigate(cmd) => cmd.execute(transport).await,
            Self::Routes(cmd) => cmd.execute(transport).await,
            Self::Legend(cmd) => cmd.execute(transport).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The address of the platform's web server.
    #[arg(long, env = "MATURITY_API_BASE", default_value = config::DEFAULT_API_BASE_URL, value_parser = Url::parse)]
    api_base_url: Url,

    /// The path under which the server mounts its API.
    #[arg(long, env = "MATURITY_API_PREFIX", default_value = config::DEFAULT_API_PREFIX)]
    api_prefix: String,

    /// How long to wait for an ordinary request, in seconds. Image uploads
    /// always get 60 seconds.
    #[arg(long, env = "MATURITY_TIMEOUT_SECS", default_value_t = config::DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Whether `navigate` also checks the roles a page declares.
    #[arg(long, value_enum, default_value_t)]
    role_policy: RolePolicy,

    /// Keep the session in memory only. Nothing is read from or written to
    /// disk.
    #[arg(long)]
    ephemeral: bool,

    #[clap(subcommand)]
    command: Command,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            api_base_url: self.api_base_url.clone(),
            api_prefix: self.api_prefix.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            role_policy: self.role_policy,
        }
    }
}

fn get_session_storage(args: &Args) -> Box<dyn storage::Storage> {
    if !args.ephemeral {
        if let Some(file_storage) = storage::File::new("session.json") {
            return Box::new(file_storage);
        }
        debug!("No data directory is available; the session will not outlive this run");
    }

    Box::new(storage::Memory::new())
}

async fn run(args: Args) -> Result<()> {
    let session = Arc::new(Session::hydrate(get_session_storage(&args)).await?);
    let transport = Transport::new(args.config(), session)?;

    command::Command::execute(args.command, &transport).await
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("MATURITY_LOG", "warn")
        .write_style("MATURITY_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        if let Error::Api(ref failure) = e {
            println!("{}", failure.to_record());
        }
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["maturity", "--ephemeral", "routes"]).unwrap();
        let config = args.config();
        assert_eq!(config.api_base_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.role_policy, RolePolicy::Ignore);
        assert!(args.ephemeral);
    }

    #[test]
    fn nested_subcommands() {
        let args = Args::try_parse_from([
            "maturity",
            "admin",
            "applications",
            "-p",
            "status=pending",
            "--param",
            "page=2",
        ])
        .unwrap();
        match args.command {
            Command::Admin(command::admin::Admin::Applications { params, .. }) => assert_eq!(
                params,
                vec![
                    ("status".to_owned(), "pending".to_owned()),
                    ("page".to_owned(), "2".to_owned())
                ]
            ),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
