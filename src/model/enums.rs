// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use clap::ValueEnum;
use inflector::Inflector as _;
use serde::{Deserialize, Serialize};

macro_rules! display_as_title_case {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let value = self.to_possible_value().ok_or(fmt::Error)?;
                    write!(f, "{}", value.get_name().to_title_case())
                }
            }
        )+
    };
}

/// The tag style the web front end renders a status with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Tone {
    Info,
    Primary,
    Success,
    Warning,
    Danger,
}

#[derive(Copy, Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Role {
    School,
    Admin,
    RegionAdmin,
}

#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub(crate) enum AssessmentStatus {
    Draft,
    Collecting,
    Analyzing,
    Completed,
}

impl AssessmentStatus {
    pub(crate) const fn tone(self) -> Tone {
        match self {
            Self::Draft => Tone::Info,
            Self::Collecting => Tone::Warning,
            Self::Analyzing => Tone::Primary,
            Self::Completed => Tone::Success,
        }
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub(crate) const fn tone(self) -> Tone {
        match self {
            Self::Pending => Tone::Warning,
            Self::Approved => Tone::Success,
            Self::Rejected => Tone::Danger,
        }
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SurveyType {
    Teacher,
    Student,
    Manager,
}

#[derive(Copy, Clone, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub(crate) enum MaturityLevel {
    Poor,
    Pass,
    Fair,
    Good,
    Excellent,
}

impl MaturityLevel {
    pub(crate) const fn color(self) -> &'static str {
        match self {
            Self::Excellent => "#67C23A",
            Self::Good => "#409EFF",
            Self::Fair => "#E6A23C",
            Self::Pass => "#F56C6C",
            Self::Poor => "#909399",
        }
    }
}

/// The five areas an assessment scores a school on.
#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Dimension {
    Literacy,
    Institution,
    Behavior,
    Asset,
    Technology,
}

impl Dimension {
    pub(crate) const fn key(self) -> &'static str {
        match self {
            Self::Literacy => "literacy",
            Self::Institution => "institution",
            Self::Behavior => "behavior",
            Self::Asset => "asset",
            Self::Technology => "technology",
        }
    }

    /// The page a school fills this dimension in on.
    pub(crate) fn route(self, assessment_id: u64) -> String {
        format!("/school/assessment/{assessment_id}/{}", self.key())
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SchoolType {
    Primary,
    Junior,
    Senior,
    NineYear,
    TwelveYear,
}

#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub(crate) enum StorageType {
    Local,
    Cloud,
    Hybrid,
}

display_as_title_case!(
    Tone,
    Role,
    AssessmentStatus,
    ApplicationStatus,
    SurveyType,
    MaturityLevel,
    Dimension,
    SchoolType,
    StorageType,
);

#[cfg(test)]
mod tests {
    use serde_test::{assert_de_tokens, assert_tokens, Token};

    use super::*;

    #[test]
    fn role_wire_format() {
        assert_tokens(
            &Role::RegionAdmin,
            &[Token::UnitVariant {
                name: "Role",
                variant: "region_admin",
            }],
        );
    }

    #[test]
    fn school_type_wire_format() {
        assert_tokens(
            &SchoolType::NineYear,
            &[Token::UnitVariant {
                name: "SchoolType",
                variant: "nine_year",
            }],
        );
        assert_de_tokens(
            &SchoolType::TwelveYear,
            &[Token::UnitVariant {
                name: "SchoolType",
                variant: "twelve_year",
            }],
        );
    }

    #[test]
    fn display_is_title_case() {
        assert_eq!(Role::RegionAdmin.to_string(), "Region Admin");
        assert_eq!(SchoolType::NineYear.to_string(), "Nine Year");
        assert_eq!(AssessmentStatus::Collecting.to_string(), "Collecting");
    }

    #[test]
    fn tones_and_colors() {
        assert_eq!(AssessmentStatus::Analyzing.tone(), Tone::Primary);
        assert_eq!(ApplicationStatus::Rejected.tone(), Tone::Danger);
        assert_eq!(MaturityLevel::Excellent.color(), "#67C23A");
        assert!(MaturityLevel::Good > MaturityLevel::Pass);
    }

    #[test]
    fn dimension_routes() {
        let routes: Vec<_> = Dimension::value_variants().iter().map(|d| d.route(7)).collect();
        assert_eq!(routes[0], "/school/assessment/7/literacy");
        assert_eq!(routes[4], "/school/assessment/7/technology");
    }
}
