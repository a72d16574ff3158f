// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;

use super::{Call, Executor, Params};

/// Account applications awaiting a decision, filtered by `params`.
pub(crate) struct ListApplications {
    pub(crate) params: Params,
}

impl From<ListApplications> for Call {
    fn from(value: ListApplications) -> Self {
        Self::get("/applications/").with_query(value.params)
    }
}

impl Executor for ListApplications {
    type Response = Value;
}

pub(crate) struct ApproveApplication {
    pub(crate) application_id: u64,
}

impl From<ApproveApplication> for Call {
    fn from(value: ApproveApplication) -> Self {
        Self::post(format!("/applications/{}/approve/", value.application_id))
    }
}

impl Executor for ApproveApplication {
    type Response = Value;
}

pub(crate) struct RejectApplication {
    pub(crate) application_id: u64,
    pub(crate) data: Value,
}

impl From<RejectApplication> for Call {
    fn from(value: RejectApplication) -> Self {
        Self::post(format!("/applications/{}/reject/", value.application_id)).with_json(value.data)
    }
}

impl Executor for RejectApplication {
    type Response = Value;
}

pub(crate) struct ListSchools {
    pub(crate) params: Params,
}

impl From<ListSchools> for Call {
    fn from(value: ListSchools) -> Self {
        Self::get("/list/").with_query(value.params)
    }
}

impl Executor for ListSchools {
    type Response = Value;
}

pub(crate) struct DeleteSchool {
    pub(crate) school_id: u64,
}

impl From<DeleteSchool> for Call {
    fn from(value: DeleteSchool) -> Self {
        Self::delete(format!("/{}/delete/", value.school_id))
    }
}

impl Executor for DeleteSchool {
    type Response = Value;
}

pub(crate) struct ListAssessmentReports {
    pub(crate) params: Params,
}

impl From<ListAssessmentReports> for Call {
    fn from(value: ListAssessmentReports) -> Self {
        Self::get("/assessments/admin_list/").with_query(value.params)
    }
}

impl Executor for ListAssessmentReports {
    type Response = Value;
}
