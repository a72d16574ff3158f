// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde_json::{json, Value};

use super::{Call, Executor};

/// Applies for a school account. Anyone may apply.
pub(crate) struct SubmitApplication {
    pub(crate) data: Value,
}

impl From<SubmitApplication> for Call {
    fn from(value: SubmitApplication) -> Self {
        Self::post("/application/submit/")
            .with_json(value.data)
            .public()
    }
}

impl Executor for SubmitApplication {
    type Response = Value;
}

pub(crate) struct GetApplicationStatus {
    pub(crate) application_id: u64,
}

impl From<GetApplicationStatus> for Call {
    fn from(value: GetApplicationStatus) -> Self {
        Self::get(format!("/application/{}/status/", value.application_id)).public()
    }
}

impl Executor for GetApplicationStatus {
    type Response = Value;
}

/// Looks up the latest application filed under a contact email.
pub(crate) struct CheckApplicationByEmail {
    pub(crate) email: String,
}

impl From<CheckApplicationByEmail> for Call {
    fn from(value: CheckApplicationByEmail) -> Self {
        Self::post("/application/check-by-email/")
            .with_json(json!({ "email": value.email }))
            .public()
    }
}

impl Executor for CheckApplicationByEmail {
    type Response = Value;
}

pub(crate) struct GetSchoolInfo;

impl From<GetSchoolInfo> for Call {
    fn from(_: GetSchoolInfo) -> Self {
        Self::get("/school/info/")
    }
}

impl Executor for GetSchoolInfo {
    type Response = Value;
}

pub(crate) struct UpdateSchoolInfo {
    pub(crate) data: Value,
}

impl From<UpdateSchoolInfo> for Call {
    fn from(value: UpdateSchoolInfo) -> Self {
        Self::put("/school/update/").with_json(value.data)
    }
}

impl Executor for UpdateSchoolInfo {
    type Response = Value;
}

#[cfg(test)]
mod tests {
    use reqwest::Method;

    use crate::api::{tests::route_of, Body};

    use super::*;

    #[test]
    fn routes() {
        assert_eq!(
            route_of(GetApplicationStatus { application_id: 12 }),
            (Method::GET, "/application/12/status/".to_owned())
        );
        assert_eq!(
            route_of(GetSchoolInfo),
            (Method::GET, "/school/info/".to_owned())
        );
        assert_eq!(
            route_of(CheckApplicationByEmail {
                email: "office@school.example".to_owned()
            }),
            (Method::POST, "/application/check-by-email/".to_owned())
        );
    }

    #[test]
    fn application_is_public_and_passes_payload_through() {
        let payload = json!({ "school_name": "School 07", "contact_email": "office@school07.example" });
        let call = Call::from(SubmitApplication {
            data: payload.clone(),
        });
        assert_eq!(call.method, Method::POST);
        assert_eq!(call.path, "/application/submit/");
        assert!(call.public);
        assert_eq!(call.body, Body::Json(payload));
    }

    #[test]
    fn update_uses_put() {
        let call = Call::from(UpdateSchoolInfo {
            data: json!({ "teacher_count": 80 }),
        });
        assert_eq!(call.method, Method::PUT);
        assert_eq!(call.path, "/school/update/");
        assert!(!call.public);
    }
}
