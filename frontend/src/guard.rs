use yew::prelude::*;
use yew_router::prelude::*;

use crate::models::{Role, Session};
use crate::session::use_session;
use crate::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Allow,
    DenyUnauthenticated,
    DenyWrongRole,
}

/// Total role check. A missing user never satisfies a required role.
pub fn check_access(session: &Session, required: Option<Role>) -> Access {
    if !session.is_authenticated {
        return Access::DenyUnauthenticated;
    }
    match required {
        Some(role) if session.role() != Some(role) => Access::DenyWrongRole,
        _ => Access::Allow,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardKind {
    Open,
    PublicOnly,
    Protected(Option<Role>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum GuardDecision {
    Render,
    Redirect(Route),
    /// The session has not settled yet; no redirect may be decided.
    Pending,
}

pub fn evaluate(kind: GuardKind, session: &Session, current: &Route) -> GuardDecision {
    match kind {
        GuardKind::Open => GuardDecision::Render,
        _ if session.is_loading => GuardDecision::Pending,
        GuardKind::PublicOnly => {
            // authenticated but unverified users still need the code page
            if session.is_authenticated && *current != Route::VerifyEmail {
                GuardDecision::Redirect(Route::Dashboard)
            } else {
                GuardDecision::Render
            }
        }
        GuardKind::Protected(required) => match check_access(session, required) {
            Access::Allow => GuardDecision::Render,
            Access::DenyUnauthenticated => GuardDecision::Redirect(Route::Login),
            Access::DenyWrongRole => GuardDecision::Redirect(Route::Landing),
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct GuardProps {
    /// Route matched by the router for this render.
    pub route: Route,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Guard)]
pub fn guard(props: &GuardProps) -> Html {
    let ctx = use_session();
    let kind = props.route.descriptor().guard;

    match evaluate(kind, ctx.session(), &props.route) {
        GuardDecision::Render => html! { <>{ for props.children.iter() }</> },
        GuardDecision::Redirect(to) => {
            log::debug!("guard redirects {} -> {}", props.route.to_path(), to.to_path());
            html! { <Redirect<Route> {to} /> }
        }
        GuardDecision::Pending => html! {
            <div class="page-loading">
                <div class="spinner"></div>
                <p>{ "Loading…" }</p>
            </div>
        },
    }
}
