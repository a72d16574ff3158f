// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Subcommand;
use serde_json::Value;

use crate::{
    api::region_admin::{
        RegionCreateSchool, RegionGetAssessment, RegionListAssessments, RegionListSchools,
        RegionOverview, RegionResetSchoolPassword,
    },
    error::Result,
    model::enums::{AssessmentStatus, SchoolType},
    transport::Transport,
};

use super::{filter, parse_json, parse_param, show};

/// Oversee the schools of a region.
#[derive(Debug, Subcommand)]
pub(crate) enum Region {
    /// Summary figures for the region.
    Overview,
    Schools {
        #[arg(long, value_enum)]
        school_type: Option<SchoolType>,
        /// Any other `key=value` query parameter. May be repeated.
        #[arg(long = "param", short, value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Create a school account directly, without an application.
    CreateSchool {
        #[arg(value_parser = parse_json)]
        data: Value,
    },
    Assessments {
        #[arg(long, value_enum)]
        status: Option<AssessmentStatus>,
        #[arg(long = "param", short, value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    Assessment {
        #[clap()]
        id: u64,
    },
    /// Issue a new password for a school account.
    ResetPassword {
        #[clap()]
        school_id: u64,
    },
}

#[async_trait]
impl super::Command for Region {
    async fn execute(self, transport: &Transport) -> Result<()> {
        match self {
            Self::Overview => show(RegionOverview, transport).await,
            Self::Schools {
                school_type,
                params,
            } => {
                let params = filter(params, "school_type", school_type)?;
                show(RegionListSchools { params }, transport).await
            }
            Self::CreateSchool { data } => show(RegionCreateSchool { data }, transport).await,
            Self::Assessments { status, params } => {
                let params = filter(params, "status", status)?;
                show(RegionListAssessments { params }, transport).await
            }
            Self::Assessment { id } => {
                show(RegionGetAssessment { assessment_id: id }, transport).await
            }
            Self::ResetPassword { school_id } => {
                show(RegionResetSchoolPassword { school_id }, transport).await
            }
        }
    }
}
