use yew::prelude::*;
use yew_router::prelude::*;

use crate::logout::Logout;
use crate::models::{Role, User};
use crate::session::use_session;
use crate::Route;

/* -------------------------------------------------------------------------- */
/*                                  shells                                    */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Public,
    UserDashboard,
    AdminDashboard,
}

fn under(path: &str, prefix: &str) -> bool {
    path == prefix || path.starts_with(&format!("{prefix}/"))
}

impl Shell {
    pub fn for_path(path: &str) -> Shell {
        if under(path, "/dashboard") {
            Shell::UserDashboard
        } else if under(path, "/admin") {
            Shell::AdminDashboard
        } else {
            Shell::Public
        }
    }

    fn side_nav(self) -> Option<Role> {
        match self {
            Shell::Public => None,
            Shell::UserDashboard => Some(Role::User),
            Shell::AdminDashboard => Some(Role::Admin),
        }
    }
}

/* -------------------------------------------------------------------------- */
/*                               side navigation                              */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, PartialEq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: Route,
}

fn item(label: &'static str, route: Route) -> NavItem {
    NavItem { label, route }
}

pub fn nav_items(role: Role) -> Vec<NavItem> {
    match role {
        Role::User => vec![
            item("My Reports", Route::Dashboard),
            item("Report Issue", Route::ReportIssue),
            item("All Issues", Route::DashboardIssues),
            item("Map View", Route::DashboardMap),
            item("Hall of Fame", Route::DashboardHallOfFame),
            item("Notifications", Route::Notifications),
            item("Profile", Route::Profile),
        ],
        Role::Admin => vec![
            item("Pending Verification", Route::PendingVerification),
            item("All Issues", Route::AdminIssues),
            item("Map View", Route::WardMap),
            item("Analytics", Route::Analytics),
            item("Hall of Fame", Route::AdminHallOfFame),
            item("Notifications", Route::AdminNotifications),
            item("Profile", Route::AdminProfile),
        ],
    }
}

/// Exact match, like the sidebar highlight in the dashboards.
pub fn is_active(item: &NavItem, current: &Route) -> bool {
    item.route == *current
}

#[derive(Properties, PartialEq)]
struct SideNavProps {
    role: Role,
    current: Route,
    user: Option<User>,
}

#[function_component(SideNav)]
fn side_nav(props: &SideNavProps) -> Html {
    let accent = match props.role {
        Role::User => "accent-teal",
        Role::Admin => "accent-blue",
    };
    let (initial, name, subtitle) = match &props.user {
        Some(u) => {
            let subtitle = match props.role {
                Role::User => u.email.clone(),
                Role::Admin => "Administrator".to_string(),
            };
            (u.initial(), u.name.clone(), subtitle)
        }
        None => (String::new(), String::new(), String::new()),
    };

    html! {
        <aside class={classes!("sidebar", accent)}>
            <div class="sidebar-profile">
                <div class="avatar">{ initial }</div>
                <div>
                    <p class="sidebar-name">{ name }</p>
                    <p class="sidebar-subtitle">{ subtitle }</p>
                </div>
            </div>
            <nav>
                <ul class="sidebar-list">
                    { for nav_items(props.role).into_iter().map(|entry| {
                        let active = is_active(&entry, &props.current);
                        html! {
                            <li key={entry.route.to_path()}>
                                <Link<Route>
                                    to={entry.route.clone()}
                                    classes={classes!("sidebar-link", active.then_some("active"))}
                                >
                                    { entry.label }
                                </Link<Route>>
                            </li>
                        }
                    }) }
                </ul>
            </nav>
        </aside>
    }
}

/* -------------------------------------------------------------------------- */
/*                                   header                                   */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderLink {
    pub label: &'static str,
    pub route: Route,
}

/// Links of the top bar, depending on who is signed in.
pub fn header_links(role: Option<Role>) -> Vec<HeaderLink> {
    let map = match role {
        Some(Role::Admin) => Route::WardMap,
        _ => Route::CityMap,
    };
    let mut links = vec![
        HeaderLink {
            label: "Issues",
            route: Route::Issues,
        },
        HeaderLink {
            label: "Map",
            route: map,
        },
    ];
    match role {
        Some(Role::User) => links.push(HeaderLink {
            label: "Report Issue",
            route: Route::ReportIssue,
        }),
        Some(Role::Admin) => links.push(HeaderLink {
            label: "Admin Panel",
            route: Route::PendingVerification,
        }),
        None => {}
    }
    links
}

/// Entry of the signed-in menu that leads back to the role's home.
pub fn menu_home(role: Role) -> HeaderLink {
    match role {
        Role::User => HeaderLink {
            label: "Dashboard",
            route: Route::Dashboard,
        },
        Role::Admin => HeaderLink {
            label: "Admin Panel",
            route: Route::PendingVerification,
        },
    }
}

#[function_component(Header)]
pub fn header() -> Html {
    let ctx = use_session();
    let session = ctx.session();
    let user = session.user.clone().filter(|_| session.is_authenticated);
    let role = user.as_ref().map(|u| u.role);

    let account = match user {
        Some(user) => {
            let home = menu_home(user.role);
            html! {
                <div class="user-menu">
                    <button class="user-menu-button" type="button">
                        <span class="avatar">{ user.initial() }</span>
                        <span class="user-name">{ user.name.clone() }</span>
                    </button>
                    <div class="user-menu-items">
                        <Link<Route> to={home.route} classes="menu-item">{ home.label }</Link<Route>>
                        <Logout class="menu-item" />
                    </div>
                </div>
            }
        }
        None => html! {
            <div class="auth-links">
                <Link<Route> to={Route::Login} classes="nav-link">{ "Login" }</Link<Route>>
                <Link<Route> to={Route::Register} classes="nav-link primary">{ "Register" }</Link<Route>>
            </div>
        },
    };

    html! {
        <nav class="navbar">
            <div class="navbar-left">
                <Link<Route> to={Route::Landing} classes="brand">{ "UrbanFix" }</Link<Route>>
                <div class="navbar-links">
                    { for header_links(role).into_iter().map(|link| html! {
                        <Link<Route> to={link.route} classes="nav-link">{ link.label }</Link<Route>>
                    }) }
                </div>
            </div>
            <div class="navbar-right">{ account }</div>
        </nav>
    }
}

/* -------------------------------------------------------------------------- */
/*                                   footer                                   */
/* -------------------------------------------------------------------------- */

#[function_component(Footer)]
pub fn footer() -> Html {
    let year = js_year();
    html! {
        <footer class="footer">
            <div class="footer-grid">
                <div>
                    <span class="brand">{ "UrbanFix" }</span>
                    <p>{ "Empowering citizens to report and resolve urban issues for a better community." }</p>
                </div>
                <div>
                    <h3>{ "Quick Links" }</h3>
                    <ul>
                        <li><Link<Route> to={Route::Landing}>{ "Home" }</Link<Route>></li>
                        <li><Link<Route> to={Route::Issues}>{ "Issues" }</Link<Route>></li>
                        <li><Link<Route> to={Route::CityMap}>{ "Map" }</Link<Route>></li>
                        <li><Link<Route> to={Route::ReportIssue}>{ "Report Issue" }</Link<Route>></li>
                    </ul>
                </div>
                <div>
                    <h3>{ "Contact Us" }</h3>
                    <ul>
                        <li>{ "Bijayapur Sadak, Dharan" }</li>
                        <li>{ "contact@urbanfix.com" }</li>
                        <li>{ "+977 9842476397" }</li>
                    </ul>
                </div>
            </div>
            <p class="footer-copy">{ format!("© {year} UrbanFix. All rights reserved.") }</p>
        </footer>
    }
}

fn js_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}

/* -------------------------------------------------------------------------- */
/*                                   layout                                   */
/* -------------------------------------------------------------------------- */

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub shell: Shell,
    pub current: Route,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let ctx = use_session();

    let body = match props.shell.side_nav() {
        None => html! {
            <main class="public-content">
                { for props.children.iter() }
            </main>
        },
        Some(role) => html! {
            <div class="dashboard">
                <SideNav {role} current={props.current.clone()} user={ctx.session().user.clone()} />
                <main class="dashboard-content">
                    { for props.children.iter() }
                </main>
            </div>
        },
    };

    html! {
        <div class="app-frame">
            <Header />
            { body }
            <Footer />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_prefix_matching_is_per_segment() {
        assert_eq!(Shell::for_path("/dashboard"), Shell::UserDashboard);
        assert_eq!(Shell::for_path("/dashboard/report"), Shell::UserDashboard);
        assert_eq!(Shell::for_path("/admin"), Shell::AdminDashboard);
        assert_eq!(Shell::for_path("/administrators"), Shell::Public);
        assert_eq!(Shell::for_path("/issues/3"), Shell::Public);
    }

    #[test]
    fn nav_sets_stay_inside_their_shell() {
        for (role, shell) in [(Role::User, Shell::UserDashboard), (Role::Admin, Shell::AdminDashboard)] {
            let items = nav_items(role);
            assert_eq!(items.len(), 7);
            for entry in items {
                assert_eq!(entry.route.descriptor().shell, shell, "{}", entry.label);
            }
        }
    }

    #[test]
    fn exactly_one_entry_is_highlighted() {
        let items = nav_items(Role::Admin);
        let active: Vec<_> = items
            .iter()
            .filter(|i| is_active(i, &Route::Analytics))
            .map(|i| i.label)
            .collect();
        assert_eq!(active, vec!["Analytics"]);

        let none = nav_items(Role::User)
            .iter()
            .filter(|i| is_active(i, &Route::Admin))
            .count();
        assert_eq!(none, 0);
    }

    #[test]
    fn header_links_follow_the_role() {
        let labels = |role| {
            header_links(role)
                .into_iter()
                .map(|l| l.label)
                .collect::<Vec<_>>()
        };
        assert_eq!(labels(None), vec!["Issues", "Map"]);
        assert_eq!(labels(Some(Role::User)), vec!["Issues", "Map", "Report Issue"]);
        assert_eq!(labels(Some(Role::Admin)), vec!["Issues", "Map", "Admin Panel"]);

        assert_eq!(header_links(Some(Role::Admin))[1].route, Route::WardMap);
        assert_eq!(header_links(None)[1].route, Route::CityMap);
    }

    #[test]
    fn menu_home_matches_role() {
        assert_eq!(menu_home(Role::User).route, Route::Dashboard);
        assert_eq!(menu_home(Role::Admin).route, Route::PendingVerification);
    }
}
