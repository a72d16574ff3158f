// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::{Parser, ValueEnum as _};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::{
    error::Result,
    model::enums::Dimension,
    router::{self, Disposition, Guard, Route, ROUTES},
    transport::Transport,
};

/// Check where a page navigation would end up for the current session.
#[derive(Debug, Parser)]
pub(crate) struct Navigate {
    /// The page being left, if any.
    #[arg(long)]
    from: Option<String>,

    /// The page to open, e.g. `/admin/schools`.
    #[clap()]
    to: String,
}

#[async_trait]
impl super::Command for Navigate {
    async fn execute(self, transport: &Transport) -> Result<()> {
        let guard = Guard::new(transport.config().role_policy);
        match guard.decide(&self.to, self.from.as_deref(), transport.session()) {
            Disposition::Proceed => println!("proceed {}", location(&self.to)),
            Disposition::Redirect(to) => println!("redirect {to}"),
        }
        Ok(())
    }
}

/// The route a path opens, with the values its parameters took. Unknown
/// paths are echoed back.
fn location(path: &str) -> String {
    let Some(m) = router::resolve(path) else {
        return path.to_owned();
    };
    let bound = m
        .route
        .path
        .split('/')
        .filter_map(|segment| segment.strip_prefix(':'))
        .filter_map(|name| m.param(name).map(|value| format!("{name}={value}")))
        .collect::<Vec<_>>();
    if bound.is_empty() {
        m.route.path.to_owned()
    } else {
        format!("{} ({})", m.route.path, bound.join(", "))
    }
}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Sign-in")]
    requires_auth: &'static str,
    #[tabled(rename = "Roles")]
    roles: String,
    #[tabled(rename = "Redirect")]
    redirect: &'static str,
}

impl From<&Route> for Row {
    fn from(route: &Route) -> Self {
        Self {
            path: route.path.to_owned(),
            name: route.name.unwrap_or_default(),
            requires_auth: if route.meta.requires_auth { "yes" } else { "no" },
            roles: route
                .meta
                .roles
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            redirect: route.redirect.unwrap_or_default(),
        }
    }
}

/// List the platform's pages and who may open them.
#[derive(Debug, Parser)]
pub(crate) struct Routes {
    /// Only list the data entry pages of this assessment.
    #[arg(long)]
    assessment: Option<u64>,
}

fn data_entry_pages(assessment_id: u64) -> Vec<Row> {
    Dimension::value_variants()
        .iter()
        .filter_map(|dimension| {
            let path = dimension.route(assessment_id);
            router::resolve(&path).map(|m| Row {
                path,
                ..Row::from(m.route)
            })
        })
        .collect()
}

#[async_trait]
impl super::Command for Routes {
    async fn execute(self, _: &Transport) -> Result<()> {
        let rows: Vec<Row> = match self.assessment {
            Some(id) => data_entry_pages(id),
            None => ROUTES.iter().map(Row::from).collect(),
        };
        println!(
            "{}",
            Table::new(rows)
                .with(Style::rounded())
                .with(Modify::new(Columns::new(..)).with(Alignment::left()))
        );
        Ok(())
    }
}
