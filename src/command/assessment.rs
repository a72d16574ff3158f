// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Subcommand;
use serde_json::Value;

use crate::{
    api::assessment::{
        CreateAssessment, GetAssessment, GetReportData, GetReportDetail, ListAssessments,
        SubmitAssessment, UpdateAssessment,
    },
    error::Result,
    transport::Transport,
};

use super::{parse_json, show};

/// Work on the signed-in school's assessments.
#[derive(Debug, Subcommand)]
pub(crate) enum Assessment {
    List,
    /// Start a new assessment.
    Create,
    Get {
        #[clap()]
        id: u64,
    },
    /// Save dimension data into an assessment.
    Update {
        #[clap()]
        id: u64,
        #[arg(value_parser = parse_json)]
        data: Value,
    },
    /// Close data collection and generate the report.
    Submit {
        #[clap()]
        id: u64,
    },
    /// Show the scores of a finished assessment.
    Report {
        #[clap()]
        id: u64,
        /// Include the improvement suggestions.
        #[arg(long)]
        detail: bool,
    },
}

#[async_trait]
impl super::Command for Assessment {
    async fn execute(self, transport: &Transport) -> Result<()> {
        match self {
            Self::List => show(ListAssessments, transport).await,
            Self::Create => show(CreateAssessment, transport).await,
            Self::Get { id } => show(GetAssessment { assessment_id: id }, transport).await,
            Self::Update { id, data } => {
                show(
                    UpdateAssessment {
                        assessment_id: id,
                        data,
                    },
                    transport,
                )
                .await
            }
            Self::Submit { id } => show(SubmitAssessment { assessment_id: id }, transport).await,
            Self::Report { id, detail: false } => {
                show(GetReportData { assessment_id: id }, transport).await
            }
            Self::Report { id, detail: true } => {
                show(GetReportDetail { assessment_id: id }, transport).await
            }
        }
    }
}
