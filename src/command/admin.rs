// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Subcommand;
use serde_json::{json, Value};

use crate::{
    api::admin::{
        ApproveApplication, DeleteSchool, ListApplications, ListAssessmentReports,
        ListSchools, RejectApplication,
    },
    error::Result,
    model::enums::{ApplicationStatus, AssessmentStatus, SchoolType},
    transport::Transport,
};

use super::{filter, parse_param, show};

/// Platform administration.
#[derive(Debug, Subcommand)]
pub(crate) enum Admin {
    /// List account applications.
    Applications {
        #[arg(long, value_enum)]
        status: Option<ApplicationStatus>,
        /// Any other `key=value` query parameter, such as `page=2`. May be
        /// repeated.
        #[arg(long = "param", short, value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    Approve {
        #[clap()]
        application_id: u64,
    },
    Reject {
        #[clap()]
        application_id: u64,
        /// Shown to the applicant.
        #[arg(long)]
        reason: String,
    },
    Schools {
        #[arg(long, value_enum)]
        school_type: Option<SchoolType>,
        #[arg(long = "param", short, value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Delete a school account together with its data.
    DeleteSchool {
        #[clap()]
        school_id: u64,
    },
    /// List the assessment reports of every school.
    Reports {
        #[arg(long, value_enum)]
        status: Option<AssessmentStatus>,
        #[arg(long = "param", short, value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

impl Admin {
    fn reject_body(reason: String) -> Value {
        json!({ "reject_reason": reason })
    }
}

#[async_trait]
impl super::Command for Admin {
    async fn execute(self, transport: &Transport) -> Result<()> {
        match self {
            Self::Applications { status, params } => {
                let params = filter(params, "status", status)?;
                show(ListApplications { params }, transport).await
            }
            Self::Approve { application_id } => {
                show(ApproveApplication { application_id }, transport).await
            }
            Self::Reject {
                application_id,
                reason,
            } => {
                show(
                    RejectApplication {
                        application_id,
                        data: Self::reject_body(reason),
                    },
                    transport,
                )
                .await
            }
            Self::Schools {
                school_type,
                params,
            } => {
                let params = filter(params, "school_type", school_type)?;
                show(ListSchools { params }, transport).await
            }
            Self::DeleteSchool { school_id } => show(DeleteSchool { school_id }, transport).await,
            Self::Reports { status, params } => {
                let params = filter(params, "status", status)?;
                show(ListAssessmentReports { params }, transport).await
            }
        }
    }
}
