use yew::prelude::*;
use yew_router::prelude::*;

mod api;
mod auth;
mod guard;
mod layout;
mod logger;
mod logout;
mod models;
mod pages;
mod session;
mod utils;
mod validation;

use guard::{Guard, GuardKind};
use layout::{Layout, Shell};
use models::Role;
use session::SessionProvider;

/* -------------------- routing -------------------- */

#[derive(Routable, Clone, Debug, PartialEq)]
pub enum Route {
    // public
    #[at("/")]
    Landing,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/forgot")]
    ForgotPassword,
    #[at("/verify-email")]
    VerifyEmail,
    #[at("/issues")]
    Issues,
    #[at("/issues/:id")]
    IssueDetail { id: String },
    #[at("/hall-of-fame")]
    HallOfFame,
    #[at("/map")]
    CityMap,

    // citizen dashboard
    #[at("/dashboard")]
    Dashboard,
    #[at("/dashboard/report")]
    ReportIssue,
    #[at("/dashboard/profile")]
    Profile,
    #[at("/dashboard/city-map")]
    DashboardMap,
    #[at("/dashboard/hall-of-fame")]
    DashboardHallOfFame,
    #[at("/dashboard/issues")]
    DashboardIssues,
    #[at("/dashboard/notifications")]
    Notifications,

    // administration
    #[at("/admin")]
    Admin,
    #[at("/admin/profile")]
    AdminProfile,
    #[at("/admin/pending")]
    PendingVerification,
    #[at("/admin/ward-users")]
    WardUsers,
    #[at("/admin/analytics")]
    Analytics,
    #[at("/admin/hall-of-fame")]
    AdminHallOfFame,
    #[at("/admin/issues")]
    AdminIssues,
    #[at("/admin/ward-map")]
    WardMap,
    #[at("/admin/notifications")]
    AdminNotifications,

    #[not_found]
    #[at("/404")]
    NotFound,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub shell: Shell,
    pub guard: GuardKind,
}

impl Route {
    pub fn descriptor(&self) -> RouteDescriptor {
        use Route::*;

        let (shell, guard) = match self {
            Landing | Issues | IssueDetail { .. } | HallOfFame | CityMap | NotFound => {
                (Shell::Public, GuardKind::Open)
            }
            Login | Register | ForgotPassword | VerifyEmail => {
                (Shell::Public, GuardKind::PublicOnly)
            }
            Dashboard | ReportIssue | Profile | DashboardMap | DashboardHallOfFame
            | DashboardIssues | Notifications => {
                (Shell::UserDashboard, GuardKind::Protected(Some(Role::User)))
            }
            Admin | AdminProfile | PendingVerification | WardUsers | Analytics
            | AdminHallOfFame | AdminIssues | WardMap | AdminNotifications => {
                (Shell::AdminDashboard, GuardKind::Protected(Some(Role::Admin)))
            }
        };
        RouteDescriptor { shell, guard }
    }
}

fn page(route: &Route) -> Html {
    use pages::*;

    match route.clone() {
        Route::Landing => html!(<LandingPage />),
        Route::Login => html!(<auth::LoginForm />),
        Route::Register => html!(<auth::RegisterForm />),
        Route::ForgotPassword => html!(<auth::ForgotPassword />),
        Route::VerifyEmail => html!(<auth::VerifyEmailForm />),
        Route::Issues | Route::DashboardIssues | Route::AdminIssues => html!(<IssuesPage />),
        Route::IssueDetail { id } => html!(<IssueDetailPage {id} />),
        Route::HallOfFame | Route::DashboardHallOfFame | Route::AdminHallOfFame => {
            html!(<HallOfFamePage />)
        }
        Route::CityMap | Route::DashboardMap => html!(<MapPage ward_only={false} />),
        Route::WardMap => html!(<MapPage ward_only={true} />),
        Route::Dashboard => html!(<UserDashboardPage />),
        Route::ReportIssue => html!(<ReportIssuePage />),
        Route::Profile | Route::AdminProfile => html!(<ProfilePage />),
        Route::Notifications | Route::AdminNotifications => html!(<NotificationsPage />),
        Route::Admin => html!(<AdminDashboardPage />),
        Route::PendingVerification => html!(<PendingVerificationPage />),
        Route::WardUsers => html!(<WardUsersPage />),
        Route::Analytics => html!(<AnalyticsPage />),
        Route::NotFound => html!(<NotFoundPage />),
    }
}

fn switch(route: Route) -> Html {
    let shell = route.descriptor().shell;
    html! {
        <Guard route={route.clone()}>
            <Layout {shell} current={route.clone()}>
                { page(&route) }
            </Layout>
        </Guard>
    }
}

/* -------------------- entry point ---------------- */

#[function_component(App)]
fn app() -> Html {
    html! {
        <SessionProvider>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </SessionProvider>
    }
}

fn main() {
    logger::init();
    log::info!("UrbanFix client starting (api: {})", api::API_BASE);
    yew::Renderer::<App>::new().render();
}
