// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! The platform's page routes and the rules deciding who may open them.

mod guard;
mod routes;

pub(crate) use guard::{Disposition, Guard};
pub(crate) use routes::ROUTES;

use crate::model::enums::Role;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Meta {
    pub(crate) requires_auth: bool,
    /// Empty when any signed-in user may open the page.
    pub(crate) roles: &'static [Role],
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Route {
    /// Absolute pattern; `:name` segments match any single segment.
    pub(crate) path: &'static str,
    pub(crate) name: Option<&'static str>,
    pub(crate) view: Option<&'static str>,
    pub(crate) meta: Meta,
    pub(crate) redirect: Option<&'static str>,
}

impl Route {
    fn parameters(&self) -> usize {
        segments(self.path).filter(|s| s.starts_with(':')).count()
    }

    fn bind(&'static self, path: &str) -> Option<Match> {
        let mut pattern = segments(self.path);
        let mut concrete = segments(path);
        let mut params = Vec::new();

        loop {
            match (pattern.next(), concrete.next()) {
                (None, None) => return Some(Match { route: self, params }),
                (Some(p), Some(c)) => {
                    if let Some(name) = p.strip_prefix(':') {
                        params.push((name, c.to_owned()));
                    } else if p != c {
                        return None;
                    }
                }
                _ => return None,
            }
        }
    }
}

/// A concrete path bound to the route it opens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Match {
    pub(crate) route: &'static Route,
    pub(crate) params: Vec<(&'static str, String)>,
}

impl Match {
    pub(crate) fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Finds the route a path opens, following route-level redirects. Query
/// strings and fragments are ignored. When several patterns match, the one
/// with the fewest parameters wins.
pub(crate) fn resolve(path: &str) -> Option<Match> {
    let mut path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .to_owned();

    // Bounded so a cycle in the table cannot hang navigation.
    for _ in 0..=ROUTES.len() {
        let found = ROUTES
            .iter()
            .filter_map(|route| route.bind(&path))
            .min_by_key(|m| m.route.parameters())?;
        match found.route.redirect {
            Some(to) => to.clone_into(&mut path),
            None => return Some(found),
        }
    }

    None
}
