//! Routed pages. Issue data comes from the UrbanFix API and is rendered by
//! the issue views, so these only provide the page frames.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::session::use_session;
use crate::Route;

#[derive(Properties, PartialEq)]
struct PageProps {
    title: AttrValue,
    #[prop_or_default]
    lead: Option<AttrValue>,
    #[prop_or_default]
    children: Children,
}

#[function_component(Page)]
fn page(props: &PageProps) -> Html {
    html! {
        <section class="page">
            <h1 class="page-title">{ props.title.clone() }</h1>
            if let Some(lead) = &props.lead {
                <p class="page-lead">{ lead.clone() }</p>
            }
            { for props.children.iter() }
        </section>
    }
}

#[function_component(LandingPage)]
pub fn landing_page() -> Html {
    html! {
        <Page title="Report. Track. Resolve."
            lead={Some(AttrValue::from("Help keep your ward safe and clean by reporting potholes, broken streetlights and other civic issues."))}>
            <div class="cta-row">
                <Link<Route> to={Route::ReportIssue} classes="button primary">{ "Report an Issue" }</Link<Route>>
                <Link<Route> to={Route::Issues} classes="button outline">{ "Browse Issues" }</Link<Route>>
            </div>
        </Page>
    }
}

#[function_component(IssuesPage)]
pub fn issues_page() -> Html {
    html!(<Page title="All Issues" lead={Some(AttrValue::from("Issues reported across the city."))} />)
}

#[derive(Properties, PartialEq)]
pub struct IssueDetailProps {
    pub id: String,
}

#[function_component(IssueDetailPage)]
pub fn issue_detail_page(props: &IssueDetailProps) -> Html {
    html! {
        <Page title={format!("Issue #{}", props.id)}>
            <Link<Route> to={Route::Issues} classes="form-link">{ "Back to issues" }</Link<Route>>
        </Page>
    }
}

#[function_component(HallOfFamePage)]
pub fn hall_of_fame_page() -> Html {
    html!(<Page title="Hall of Fame" lead={Some(AttrValue::from("Citizens who helped fix their city."))} />)
}

#[derive(Properties, PartialEq)]
pub struct MapProps {
    /// Admins only see their own ward.
    pub ward_only: bool,
}

#[function_component(MapPage)]
pub fn map_page(props: &MapProps) -> Html {
    let title = if props.ward_only { "Ward Map" } else { "City Map" };
    html!(<Page {title}><div class="map-frame"></div></Page>)
}

#[function_component(UserDashboardPage)]
pub fn user_dashboard_page() -> Html {
    let ctx = use_session();
    let name = ctx
        .session()
        .user
        .as_ref()
        .map(|u| u.name.clone())
        .unwrap_or_default();
    html!(<Page title="My Reports" lead={Some(AttrValue::from(format!("Welcome back, {name}.")))} />)
}

#[function_component(ReportIssuePage)]
pub fn report_issue_page() -> Html {
    html!(<Page title="Report an Issue" />)
}

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let ctx = use_session();
    match &ctx.session().user {
        Some(user) => html! {
            <Page title="Profile">
                <dl class="profile">
                    <dt>{ "Name" }</dt><dd>{ user.name.clone() }</dd>
                    <dt>{ "Email" }</dt><dd>{ user.email.clone() }</dd>
                    <dt>{ "Role" }</dt><dd>{ user.role.as_str() }</dd>
                    if let Some(address) = &user.address {
                        <dt>{ "Address" }</dt><dd>{ address.clone() }</dd>
                    }
                    if let Some(phone) = &user.phone_number {
                        <dt>{ "Phone" }</dt><dd>{ phone.clone() }</dd>
                    }
                </dl>
            </Page>
        },
        None => html!(<Page title="Profile" />),
    }
}

#[function_component(NotificationsPage)]
pub fn notifications_page() -> Html {
    html!(<Page title="Notifications" />)
}

#[function_component(AdminDashboardPage)]
pub fn admin_dashboard_page() -> Html {
    html! {
        <Page title="Admin Dashboard">
            <Link<Route> to={Route::PendingVerification} classes="button primary">
                { "Review pending reports" }
            </Link<Route>>
        </Page>
    }
}

#[function_component(PendingVerificationPage)]
pub fn pending_verification_page() -> Html {
    html!(<Page title="Pending Verification" lead={Some(AttrValue::from("Reports waiting for a ward officer."))} />)
}

#[function_component(WardUsersPage)]
pub fn ward_users_page() -> Html {
    html!(<Page title="Ward Users" />)
}

#[function_component(AnalyticsPage)]
pub fn analytics_page() -> Html {
    html!(<Page title="Analytics" />)
}

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <Page title="404 - Page Not Found"
            lead={Some(AttrValue::from("The page you are looking for doesn't exist or has been moved."))}>
            <Link<Route> to={Route::Landing} classes="button primary">{ "Go to Home" }</Link<Route>>
        </Page>
    }
}
