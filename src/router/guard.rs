// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use log::info;

use crate::{config::RolePolicy, session::Session};

use super::resolve;

pub(crate) const LOGIN: &str = "/login";
pub(crate) const HOME: &str = "/home";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Disposition {
    Proceed,
    Redirect(&'static str),
}

/// Decides, before each navigation, whether the target page may be opened.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Guard {
    policy: RolePolicy,
}

impl Guard {
    pub(crate) const fn new(policy: RolePolicy) -> Self {
        Self { policy }
    }

    /// Reads the session but never changes it. Paths outside the route table
    /// always proceed.
    pub(crate) fn decide(&self, target: &str, current: Option<&str>, session: &Session) -> Disposition {
        let Some(found) = resolve(target) else {
            return Disposition::Proceed;
        };
        let route = found.route;
        let authenticated = session.is_authenticated();

        let disposition = if route.meta.requires_auth && !authenticated {
            Disposition::Redirect(LOGIN)
        } else if route.path == LOGIN && authenticated {
            Disposition::Redirect(HOME)
        } else if self.policy == RolePolicy::Enforce && !route.meta.roles.is_empty() {
            match session.user() {
                Some(user) if route.meta.roles.contains(&user.role) => Disposition::Proceed,
                _ => Disposition::Redirect(HOME),
            }
        } else {
            Disposition::Proceed
        };

        if let Disposition::Redirect(to) = disposition {
            info!(
                "redirecting navigation from {} to {target} towards {to}",
                current.unwrap_or("(start)")
            );
        }
        disposition
    }
}
