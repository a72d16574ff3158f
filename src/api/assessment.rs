// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;

use super::{Call, Executor};

/// The signed-in school's assessments.
pub(crate) struct ListAssessments;

impl From<ListAssessments> for Call {
    fn from(_: ListAssessments) -> Self {
        Self::get("/assessments/")
    }
}

impl Executor for ListAssessments {
    type Response = Value;
}

pub(crate) struct CreateAssessment;

impl From<CreateAssessment> for Call {
    fn from(_: CreateAssessment) -> Self {
        Self::post("/assessments/")
    }
}

impl Executor for CreateAssessment {
    type Response = Value;
}

pub(crate) struct GetAssessment {
    pub(crate) assessment_id: u64,
}

impl From<GetAssessment> for Call {
    fn from(value: GetAssessment) -> Self {
        Self::get(format!("/assessments/{}/", value.assessment_id))
    }
}

impl Executor for GetAssessment {
    type Response = Value;
}

pub(crate) struct UpdateAssessment {
    pub(crate) assessment_id: u64,
    pub(crate) data: Value,
}

impl From<UpdateAssessment> for Call {
    fn from(value: UpdateAssessment) -> Self {
        Self::patch(format!("/assessments/{}/", value.assessment_id)).with_json(value.data)
    }
}

impl Executor for UpdateAssessment {
    type Response = Value;
}

/// Closes data collection and asks the server to produce the report.
pub(crate) struct SubmitAssessment {
    pub(crate) assessment_id: u64,
}

impl From<SubmitAssessment> for Call {
    fn from(value: SubmitAssessment) -> Self {
        Self::post(format!("/assessments/{}/submit/", value.assessment_id))
    }
}

impl Executor for SubmitAssessment {
    type Response = Value;
}

/// The computed scores of an assessment.
pub(crate) struct GetReportData {
    pub(crate) assessment_id: u64,
}

impl From<GetReportData> for Call {
    fn from(value: GetReportData) -> Self {
        Self::get(format!("/assessments/{}/data/", value.assessment_id))
    }
}

impl Executor for GetReportData {
    type Response = Value;
}

/// The scores together with the generated improvement suggestions.
pub(crate) struct GetReportDetail {
    pub(crate) assessment_id: u64,
}

impl From<GetReportDetail> for Call {
    fn from(value: GetReportDetail) -> Self {
        Self::get(format!("/assessments/{}/report-detail/", value.assessment_id))
    }
}

impl Executor for GetReportDetail {
    type Response = Value;
}
