// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use crate::model::enums::Role;

use super::{Meta, Route};

const PUBLIC: Meta = Meta {
    requires_auth: false,
    roles: &[],
};

const SIGNED_IN: Meta = Meta {
    requires_auth: true,
    roles: &[],
};

const SCHOOL: Meta = Meta {
    requires_auth: true,
    roles: &[Role::School],
};

const ADMIN: Meta = Meta {
    requires_auth: true,
    roles: &[Role::Admin],
};

const REGION_ADMIN: Meta = Meta {
    requires_auth: true,
    roles: &[Role::RegionAdmin],
};

const fn page(path: &'static str, name: &'static str, view: &'static str, meta: Meta) -> Route {
    Route {
        path,
        name: Some(name),
        view: Some(view),
        meta,
        redirect: None,
    }
}

const fn redirect(path: &'static str, to: &'static str, meta: Meta) -> Route {
    Route {
        path,
        name: None,
        view: None,
        meta,
        redirect: Some(to),
    }
}

/// Every page of the platform. Child routes of the admin and region admin
/// layouts are listed under their full paths.
pub(crate) static ROUTES: &[Route] = &[
    redirect("/", "/home", PUBLIC),
    page("/login", "login", "Login", PUBLIC),
    page("/home", "home", "Home", SIGNED_IN),
    // Account applications.
    page("/apply", "apply", "Apply", PUBLIC),
    page("/apply/success/:id", "apply-success", "ApplySuccess", PUBLIC),
    page("/apply/status/:id", "apply-status", "ApplyStatus", PUBLIC),
    page("/apply/check", "apply-check", "ApplyCheck", PUBLIC),
    // Content pages.
    page("/about", "about", "About", SIGNED_IN),
    page("/culture", "culture", "Culture", SIGNED_IN),
    page("/guide", "guide", "Guide", SIGNED_IN),
    page("/news", "news", "News", SIGNED_IN),
    // Schools.
    page(
        "/school/basic-info",
        "SchoolBasicInfo",
        "school/SchoolBasicInfo",
        SIGNED_IN,
    ),
    page("/school/dashboard", "school-dashboard", "Home", SCHOOL),
    page(
        "/school/assessment",
        "school-assessment",
        "school/AssessmentIndex",
        SCHOOL,
    ),
    page(
        "/school/assessment/:id/literacy",
        "school-data-literacy",
        "school/DataLiteracy",
        SCHOOL,
    ),
    page(
        "/school/assessment/literacy",
        "school-data-literacy-auto",
        "school/DataLiteracy",
        SCHOOL,
    ),
    page(
        "/school/assessment/:id/institution",
        "school-data-institution",
        "school/DataInstitution",
        SCHOOL,
    ),
    page(
        "/school/assessment/:id/behavior",
        "school-data-behavior",
        "school/DataBehavior",
        SCHOOL,
    ),
    page(
        "/school/assessment/:id/asset",
        "school-data-asset",
        "school/DataAsset",
        SCHOOL,
    ),
    page(
        "/school/assessment/:id/technology",
        "school-data-technology",
        "school/DataTechnology",
        SCHOOL,
    ),
    page(
        "/school/report/:id",
        "school-report",
        "school/ReportView",
        SCHOOL,
    ),
    page(
        "/school/overview",
        "school-overview",
        "school/AssessmentOverview",
        SIGNED_IN,
    ),
    // Respondents open survey links without an account.
    page("/survey/:surveyType/:uuid", "survey-fill", "SurveyFill", PUBLIC),
    // Platform administrators.
    redirect("/admin", "/admin/dashboard", ADMIN),
    page(
        "/admin/dashboard",
        "admin-dashboard",
        "admin/Dashboard",
        ADMIN,
    ),
    page(
        "/admin/applications",
        "admin-applications",
        "admin/Applications",
        ADMIN,
    ),
    page("/admin/schools", "admin-schools", "admin/Schools", ADMIN),
    page("/admin/reports", "admin-reports", "admin/Reports", ADMIN),
    page("/admin/news", "admin-news", "admin/NewsManage", ADMIN),
    // Region administrators.
    redirect("/region-admin", "/region-admin/overview", REGION_ADMIN),
    page(
        "/region-admin/overview",
        "RegionAdminOverview",
        "region-admin/Overview",
        REGION_ADMIN,
    ),
    page(
        "/region-admin/schools",
        "RegionAdminSchools",
        "region-admin/Schools",
        REGION_ADMIN,
    ),
    page(
        "/region-admin/schools/create",
        "RegionAdminSchoolCreate",
        "region-admin/SchoolCreate",
        REGION_ADMIN,
    ),
    page(
        "/region-admin/assessments",
        "RegionAdminAssessments",
        "region-admin/Assessments",
        REGION_ADMIN,
    ),
    page(
        "/region-admin/assessments/:id",
        "RegionAdminAssessmentDetail",
        "region-admin/AssessmentDetail",
        REGION_ADMIN,
    ),
];
