// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Subcommand;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    api::survey::{
        CreateSurveyInstance, GetPublicSurvey, GetSurveyInstance, GetSurveyStatistics,
        ListAssessmentSurveys, RegenerateSurveyLink, SubmitPublicSurvey, UpdateSurveyInstance,
    },
    error::Result,
    model::enums::SurveyType,
    transport::Transport,
};

use super::{parse_json, show};

/// Manage the questionnaires of an assessment, or answer one.
#[derive(Debug, Subcommand)]
pub(crate) enum Survey {
    /// List the survey instances of an assessment.
    List {
        #[clap()]
        assessment_id: u64,
    },
    /// Open a new questionnaire for an assessment.
    Create {
        #[clap()]
        assessment_id: u64,
        #[arg(value_enum)]
        survey_type: SurveyType,
        /// How many responses are expected.
        #[arg(long, default_value_t = 0)]
        target_count: u32,
    },
    Get {
        #[clap()]
        id: u64,
    },
    Update {
        #[clap()]
        id: u64,
        #[arg(value_parser = parse_json)]
        data: Value,
    },
    /// Replace the share link of an instance.
    RegenerateLink {
        #[clap()]
        id: u64,
    },
    /// Show response counts and answer distributions.
    Stats {
        #[clap()]
        id: u64,
    },
    /// Show the questionnaire behind a share link.
    Open {
        #[clap()]
        uuid: Uuid,
    },
    /// Answer the questionnaire behind a share link.
    Answer {
        #[clap()]
        uuid: Uuid,
        /// The answers as a JSON object keyed by question.
        #[arg(value_parser = parse_json)]
        answers: Value,
    },
}

#[async_trait]
impl super::Command for Survey {
    async fn execute(self, transport: &Transport) -> Result<()> {
        match self {
            Self::List { assessment_id } => {
                show(ListAssessmentSurveys { assessment_id }, transport).await
            }
            Self::Create {
                assessment_id,
                survey_type,
                target_count,
            } => {
                show(
                    CreateSurveyInstance {
                        assessment_id,
                        survey_type,
                        target_count,
                    },
                    transport,
                )
                .await
            }
            Self::Get { id } => show(GetSurveyInstance { instance_id: id }, transport).await,
            Self::Update { id, data } => {
                show(
                    UpdateSurveyInstance {
                        instance_id: id,
                        data,
                    },
                    transport,
                )
                .await
            }
            Self::RegenerateLink { id } => {
                show(RegenerateSurveyLink { instance_id: id }, transport).await
            }
            Self::Stats { id } => show(GetSurveyStatistics { instance_id: id }, transport).await,
            Self::Open { uuid } => show(GetPublicSurvey { uuid }, transport).await,
            Self::Answer { uuid, answers } => {
                show(SubmitPublicSurvey { uuid, answers }, transport).await
            }
        }
    }
}
