// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;

use super::{Call, Executor, Params};

pub(crate) struct RegionOverview;

impl From<RegionOverview> for Call {
    fn from(_: RegionOverview) -> Self {
        Self::get("/region-admin/overview/")
    }
}

impl Executor for RegionOverview {
    type Response = Value;
}

pub(crate) struct RegionListSchools {
    pub(crate) params: Params,
}

impl From<RegionListSchools> for Call {
    fn from(value: RegionListSchools) -> Self {
        Self::get("/region-admin/schools/").with_query(value.params)
    }
}

impl Executor for RegionListSchools {
    type Response = Value;
}

pub(crate) struct RegionCreateSchool {
    pub(crate) data: Value,
}

impl From<RegionCreateSchool> for Call {
    fn from(value: RegionCreateSchool) -> Self {
        Self::post("/region-admin/schools/create/").with_json(value.data)
    }
}

impl Executor for RegionCreateSchool {
    type Response = Value;
}

pub(crate) struct RegionListAssessments {
    pub(crate) params: Params,
}

impl From<RegionListAssessments> for Call {
    fn from(value: RegionListAssessments) -> Self {
        Self::get("/region-admin/assessments/").with_query(value.params)
    }
}

impl Executor for RegionListAssessments {
    type Response = Value;
}

pub(crate) struct RegionGetAssessment {
    pub(crate) assessment_id: u64,
}

impl From<RegionGetAssessment> for Call {
    fn from(value: RegionGetAssessment) -> Self {
        Self::get(format!("/region-admin/assessments/{}/", value.assessment_id))
    }
}

impl Executor for RegionGetAssessment {
    type Response = Value;
}

/// Issues a new password for a school's account in the region.
pub(crate) struct RegionResetSchoolPassword {
    pub(crate) school_id: u64,
}

impl From<RegionResetSchoolPassword> for Call {
    fn from(value: RegionResetSchoolPassword) -> Self {
        Self::post(format!(
            "/region-admin/schools/{}/reset-password/",
            value.school_id
        ))
    }
}

impl Executor for RegionResetSchoolPassword {
    type Response = Value;
}
