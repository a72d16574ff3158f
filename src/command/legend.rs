// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;

use async_trait::async_trait;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::{
    error::Result,
    model::enums::{
        ApplicationStatus, AssessmentStatus, Dimension, MaturityLevel, Role, SchoolType,
        StorageType, SurveyType,
    },
    transport::Transport,
};

use super::wire;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Vocabulary {
    Roles,
    AssessmentStatuses,
    ApplicationStatuses,
    SurveyTypes,
    MaturityLevels,
    Dimensions,
    SchoolTypes,
    StorageTypes,
}

#[derive(Debug, PartialEq, Tabled)]
struct Term {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Tag")]
    tag: String,
}

fn terms<T>(tag: impl Fn(T) -> String) -> Result<Vec<Term>>
where
    T: ValueEnum + Serialize + Display + Copy,
{
    T::value_variants()
        .iter()
        .map(|&term| {
            Ok(Term {
                value: wire(&term)?,
                name: term.to_string(),
                tag: tag(term),
            })
        })
        .collect()
}

fn untagged<T>(_: T) -> String {
    String::new()
}

impl Vocabulary {
    fn terms(self) -> Result<Vec<Term>> {
        match self {
            Self::Roles => terms::<Role>(untagged),
            Self::AssessmentStatuses => terms(|s: AssessmentStatus| s.tone().to_string()),
            Self::ApplicationStatuses => terms(|s: ApplicationStatus| s.tone().to_string()),
            Self::SurveyTypes => terms::<SurveyType>(untagged),
            Self::MaturityLevels => terms(|l: MaturityLevel| l.color().to_owned()),
            Self::Dimensions => terms(|d: Dimension| {
                format!("/school/assessment/:id/{}", d.key())
            }),
            Self::SchoolTypes => terms::<SchoolType>(untagged),
            Self::StorageTypes => terms::<StorageType>(untagged),
        }
    }
}

/// Show the values the platform uses for one of its vocabularies.
#[derive(Debug, Parser)]
pub(crate) struct Legend {
    #[arg(value_enum)]
    vocabulary: Vocabulary,
}

#[async_trait]
impl super::Command for Legend {
    async fn execute(self, _: &Transport) -> Result<()> {
        println!(
            "{}",
            Table::new(self.vocabulary.terms()?).with(Style::rounded())
        );
        Ok(())
    }
}
