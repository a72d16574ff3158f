// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde_json::{json, Value};
use uuid::Uuid;

use crate::model::enums::SurveyType;

use super::{Call, Executor};

pub(crate) struct ListAssessmentSurveys {
    pub(crate) assessment_id: u64,
}

impl From<ListAssessmentSurveys> for Call {
    fn from(value: ListAssessmentSurveys) -> Self {
        Self::get(format!("/surveys/assessment/{}/", value.assessment_id))
    }
}

impl Executor for ListAssessmentSurveys {
    type Response = Value;
}

pub(crate) struct CreateSurveyInstance {
    pub(crate) assessment_id: u64,
    pub(crate) survey_type: SurveyType,
    pub(crate) target_count: u32,
}

impl From<CreateSurveyInstance> for Call {
    fn from(value: CreateSurveyInstance) -> Self {
        Self::post("/surveys/instances/").with_json(json!({
            "assessment_id": value.assessment_id,
            "survey_type": value.survey_type,
            "target_count": value.target_count,
        }))
    }
}

impl Executor for CreateSurveyInstance {
    type Response = Value;
}

pub(crate) struct GetSurveyInstance {
    pub(crate) instance_id: u64,
}

impl From<GetSurveyInstance> for Call {
    fn from(value: GetSurveyInstance) -> Self {
        Self::get(format!("/surveys/instances/{}/", value.instance_id))
    }
}

impl Executor for GetSurveyInstance {
    type Response = Value;
}

pub(crate) struct UpdateSurveyInstance {
    pub(crate) instance_id: u64,
    pub(crate) data: Value,
}

impl From<UpdateSurveyInstance> for Call {
    fn from(value: UpdateSurveyInstance) -> Self {
        Self::patch(format!("/surveys/instances/{}/", value.instance_id)).with_json(value.data)
    }
}

impl Executor for UpdateSurveyInstance {
    type Response = Value;
}

/// Invalidates the current share link of an instance and issues a new one.
pub(crate) struct RegenerateSurveyLink {
    pub(crate) instance_id: u64,
}

impl From<RegenerateSurveyLink> for Call {
    fn from(value: RegenerateSurveyLink) -> Self {
        Self::post(format!(
            "/surveys/instances/{}/regenerate_link/",
            value.instance_id
        ))
    }
}

impl Executor for RegenerateSurveyLink {
    type Response = Value;
}

pub(crate) struct GetSurveyStatistics {
    pub(crate) instance_id: u64,
}

impl From<GetSurveyStatistics> for Call {
    fn from(value: GetSurveyStatistics) -> Self {
        Self::get(format!("/surveys/instances/{}/statistics/", value.instance_id))
    }
}

impl Executor for GetSurveyStatistics {
    type Response = Value;
}

/// The questionnaire behind a share link, as a respondent sees it.
pub(crate) struct GetPublicSurvey {
    pub(crate) uuid: Uuid,
}

impl From<GetPublicSurvey> for Call {
    fn from(value: GetPublicSurvey) -> Self {
        Self::get(format!("/surveys/public/{}/", value.uuid)).public()
    }
}

impl Executor for GetPublicSurvey {
    type Response = Value;
}

pub(crate) struct SubmitPublicSurvey {
    pub(crate) uuid: Uuid,
    pub(crate) answers: Value,
}

impl From<SubmitPublicSurvey> for Call {
    fn from(value: SubmitPublicSurvey) -> Self {
        Self::post(format!("/surveys/public/{}/submit/", value.uuid))
            .with_json(json!({ "answers": value.answers }))
            .public()
    }
}

impl Executor for SubmitPublicSurvey {
    type Response = Value;
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use uuid::uuid;

    use crate::api::{tests::route_of, Body};

    use super::*;

    const LINK: Uuid = uuid!("46640aca-1245-44d2-8ca9-d19750597d6c");

    #[test]
    fn routes() {
        assert_eq!(
            route_of(ListAssessmentSurveys { assessment_id: 3 }),
            (Method::GET, "/surveys/assessment/3/".to_owned())
        );
        assert_eq!(
            route_of(GetSurveyInstance { instance_id: 8 }),
            (Method::GET, "/surveys/instances/8/".to_owned())
        );
        assert_eq!(
            route_of(UpdateSurveyInstance {
                instance_id: 8,
                data: json!({})
            }),
            (Method::PATCH, "/surveys/instances/8/".to_owned())
        );
        assert_eq!(
            route_of(RegenerateSurveyLink { instance_id: 8 }),
            (Method::POST, "/surveys/instances/8/regenerate_link/".to_owned())
        );
        assert_eq!(
            route_of(GetSurveyStatistics { instance_id: 8 }),
            (Method::GET, "/surveys/instances/8/statistics/".to_owned())
        );
    }

    #[test]
    fn create_instance_body() {
        let call = Call::from(CreateSurveyInstance {
            assessment_id: 3,
            survey_type: SurveyType::Teacher,
            target_count: 40,
        });
        assert_eq!(call.path, "/surveys/instances/");
        assert_eq!(
            call.body,
            Body::Json(json!({ "assessment_id": 3, "survey_type": "teacher", "target_count": 40 }))
        );
    }

    #[test]
    fn public_calls_skip_authentication() {
        let fetch = Call::from(GetPublicSurvey { uuid: LINK });
        assert_eq!(fetch.method, Method::GET);
        assert_eq!(
            fetch.path,
            "/surveys/public/46640aca-1245-44d2-8ca9-d19750597d6c/"
        );
        assert!(fetch.public);

        let submit = Call::from(SubmitPublicSurvey {
            uuid: LINK,
            answers: json!({ "q1": "a" }),
        });
        assert_eq!(submit.method, Method::POST);
        assert_eq!(
            submit.path,
            "/surveys/public/46640aca-1245-44d2-8ca9-d19750597d6c/submit/"
        );
        assert_eq!(submit.body, Body::Json(json!({ "answers": { "q1": "a" } })));
        assert!(submit.public);
    }
}
