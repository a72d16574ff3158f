// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Subcommand;
use serde_json::Value;

use crate::{
    api::school::{
        CheckApplicationByEmail, GetApplicationStatus, GetSchoolInfo, SubmitApplication,
        UpdateSchoolInfo,
    },
    error::Result,
    transport::Transport,
};

use super::{parse_json, show};

/// Apply for a school account and follow the application.
#[derive(Debug, Subcommand)]
pub(crate) enum Application {
    /// File a new application.
    Submit {
        /// The application form as a JSON object.
        #[arg(value_parser = parse_json)]
        data: Value,
    },
    /// Show the review status of an application.
    Status {
        #[clap()]
        id: u64,
    },
    /// Find the application filed under a contact email.
    Check {
        #[clap()]
        email: String,
    },
}

#[async_trait]
impl super::Command for Application {
    async fn execute(self, transport: &Transport) -> Result<()> {
        match self {
            Self::Submit { data } => show(SubmitApplication { data }, transport).await,
            Self::Status { id } => {
                show(GetApplicationStatus { application_id: id }, transport).await
            }
            Self::Check { email } => show(CheckApplicationByEmail { email }, transport).await,
        }
    }
}

/// The signed-in school's own record.
#[derive(Debug, Subcommand)]
pub(crate) enum School {
    Info,
    /// Replace the school's basic information.
    Update {
        #[arg(value_parser = parse_json)]
        data: Value,
    },
}

#[async_trait]
impl super::Command for School {
    async fn execute(self, transport: &Transport) -> Result<()> {
        match self {
            Self::Info => show(GetSchoolInfo, transport).await,
            Self::Update { data } => show(UpdateSchoolInfo { data }, transport).await,
        }
    }
}
