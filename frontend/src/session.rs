use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{ApiError, AuthApi, HttpAuthApi};
use crate::models::{LoginRequest, Session, SignupRequest, User, VerifyEmailRequest};

/* -------------------------------------------------------------------------- */
/*                                reducer                                     */
/* -------------------------------------------------------------------------- */

/// Every mutating operation is stamped with a ticket when it starts.
pub type Ticket = u64;

#[derive(Clone, Debug, PartialEq)]
pub enum SessionAction {
    /// An operation started; later completions of older tickets are ignored.
    Started(Ticket),
    /// The operation ended with a confirmed user.
    SignedIn(Ticket, User),
    /// The operation ended with no session (failed auth check, logout).
    SignedOut(Ticket),
    /// The operation failed without changing who is signed in.
    Settled(Ticket),
}

impl SessionAction {
    fn ticket(&self) -> Ticket {
        match self {
            SessionAction::Started(t)
            | SessionAction::SignedIn(t, _)
            | SessionAction::SignedOut(t)
            | SessionAction::Settled(t) => *t,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub session: Session,
    latest: Ticket,
}

impl SessionState {
    pub fn apply(&self, action: SessionAction) -> SessionState {
        if let SessionAction::Started(t) = action {
            return SessionState {
                session: self.session.clone(),
                latest: self.latest.max(t),
            };
        }
        let ticket = action.ticket();
        if ticket != self.latest {
            log::debug!("dropping stale session update (ticket {ticket}, latest {})", self.latest);
            return self.clone();
        }

        let session = match action {
            SessionAction::SignedIn(_, user) => Session {
                user: Some(user),
                is_authenticated: true,
                is_loading: false,
            },
            SessionAction::SignedOut(_) => Session {
                user: None,
                is_authenticated: false,
                is_loading: false,
            },
            SessionAction::Settled(_) | SessionAction::Started(_) => Session {
                is_loading: false,
                ..self.session.clone()
            },
        };
        SessionState {
            session,
            latest: self.latest,
        }
    }
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

/* -------------------------------------------------------------------------- */
/*                                 store                                      */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthFailure {
    pub message: String,
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl AuthFailure {
    fn superseded() -> Self {
        Self {
            message: "This request was replaced by a newer one.".into(),
        }
    }
}

impl From<&ApiError> for AuthFailure {
    fn from(err: &ApiError) -> Self {
        Self {
            message: err.user_message(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Verified {
    pub user: User,
    pub message: Option<String>,
}

/// Sole writer of the session. Operations never fail past this boundary;
/// API errors come back as [`AuthFailure`].
pub struct SessionStore<A> {
    api: Rc<A>,
    tickets: Rc<Cell<Ticket>>,
    dispatch: Rc<dyn Fn(SessionAction)>,
}

impl<A> Clone for SessionStore<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            tickets: self.tickets.clone(),
            dispatch: self.dispatch.clone(),
        }
    }
}

impl<A: AuthApi> SessionStore<A> {
    pub fn new(api: Rc<A>, dispatch: impl Fn(SessionAction) + 'static) -> Self {
        Self {
            api,
            tickets: Rc::new(Cell::new(0)),
            dispatch: Rc::new(dispatch),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn begin(&self) -> Ticket {
        self.api.cancel_pending();
        let ticket = self.tickets.get() + 1;
        self.tickets.set(ticket);
        (self.dispatch)(SessionAction::Started(ticket));
        ticket
    }

    fn emit(&self, action: SessionAction) {
        (self.dispatch)(action);
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.tickets.get() == ticket
    }

    /// Success only counts when no newer operation has started meanwhile.
    fn settle_signed_in<T>(&self, ticket: Ticket, user: User, value: T) -> Result<T, AuthFailure> {
        if !self.is_current(ticket) {
            log::debug!("ticket {ticket} superseded, discarding {}", user.email);
            return Err(AuthFailure::superseded());
        }
        self.emit(SessionAction::SignedIn(ticket, user));
        Ok(value)
    }

    /// Aborts the in-flight request and retires its ticket, so a late
    /// completion cannot write the session.
    pub fn shutdown(&self) {
        self.begin();
    }

    pub async fn initialize(&self) {
        let ticket = self.begin();
        match self.api.check_auth().await {
            Ok(user) => {
                log::info!("restored session for {}", user.email);
                self.emit(SessionAction::SignedIn(ticket, user));
            }
            Err(err) => {
                log::info!("no active session: {err}");
                self.emit(SessionAction::SignedOut(ticket));
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthFailure> {
        let ticket = self.begin();
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        match self.api.login(&body).await {
            Ok(user) => self.settle_signed_in(ticket, user.clone(), user),
            Err(err) => {
                log::error!("login failed: {err}");
                self.emit(SessionAction::Settled(ticket));
                Err(AuthFailure::from(&err))
            }
        }
    }

    pub async fn register(&self, fields: SignupRequest) -> Result<User, AuthFailure> {
        let ticket = self.begin();
        match self.api.signup(&fields).await {
            Ok(user) => self.settle_signed_in(ticket, user.clone(), user),
            Err(err) => {
                log::error!("signup failed: {err}");
                self.emit(SessionAction::Settled(ticket));
                Err(AuthFailure::from(&err))
            }
        }
    }

    pub async fn verify_email(&self, code: &str) -> Result<Verified, AuthFailure> {
        let ticket = self.begin();
        let body = VerifyEmailRequest {
            code: code.to_string(),
        };
        match self.api.verify_email(&body).await {
            Ok(resp) => {
                let verified = Verified {
                    user: resp.user.clone(),
                    message: resp.message,
                };
                self.settle_signed_in(ticket, resp.user, verified)
            }
            Err(err) => {
                log::error!("email verification failed: {err}");
                self.emit(SessionAction::Settled(ticket));
                Err(AuthFailure::from(&err))
            }
        }
    }

    pub async fn logout(&self) {
        let ticket = self.begin();
        if let Err(err) = self.api.logout().await {
            log::error!("logout request failed: {err}");
        }
        self.emit(SessionAction::SignedOut(ticket));
    }
}

/* -------------------------------------------------------------------------- */
/*                          context + provider                                */
/* -------------------------------------------------------------------------- */

#[derive(Clone)]
pub struct SessionContext {
    pub state: UseReducerHandle<SessionState>,
    pub store: Rc<SessionStore<HttpAuthApi>>,
}

impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && Rc::ptr_eq(&self.store, &other.store)
    }
}

impl SessionContext {
    pub fn session(&self) -> &Session {
        &self.state.session
    }
}

#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionProvider missing")
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let state = use_reducer(SessionState::default);
    let dispatcher = state.dispatcher();
    let store = use_memo((), move |_| {
        SessionStore::new(Rc::new(HttpAuthApi::default()), move |action| {
            dispatcher.dispatch(action)
        })
    });

    {
        let store = store.clone();
        use_effect_with((), move |_| {
            let boot = store.clone();
            spawn_local(async move { boot.initialize().await });
            move || store.shutdown()
        });
    }

    let context = SessionContext { state, store };

    html! {
        <ContextProvider<SessionContext> {context}>
            { for props.children.iter() }
        </ContextProvider<SessionContext>>
    }
}


#[cfg(test)]
mod tests {
    use futures::channel::oneshot;
    use futures::executor::block_on;

    use super::testing::{store, Reply, ScriptedApi};
    use super::*;
    use crate::models::fixtures::user;
    use crate::models::{Role, VerifyEmailResponse};

    #[test]
    fn initialize_success_restores_user() {
        let api = ScriptedApi::default();
        api.check.borrow_mut().push_back(Reply::Now(Ok(user(Role::User))));
        let (store, state) = store(api);

        block_on(store.initialize());

        let s = state.borrow().session.clone();
        assert!(s.is_authenticated);
        assert!(!s.is_loading);
        assert_eq!(s.role(), Some(Role::User));
    }

    #[test]
    fn initialize_on_401_settles_signed_out() {
        let api = ScriptedApi::default();
        api.check.borrow_mut().push_back(Reply::Now(Err(ApiError::Rejected {
            status: 401,
            message: Some("Unauthorized".into()),
        })));
        let (store, state) = store(api);
        assert!(state.borrow().session.is_loading);

        block_on(store.initialize());

        let s = state.borrow().session.clone();
        assert!(!s.is_loading);
        assert!(!s.is_authenticated);
        assert!(s.user.is_none());
    }

    #[test]
    fn initialize_on_malformed_response_settles_signed_out() {
        let api = ScriptedApi::default();
        api.check
            .borrow_mut()
            .push_back(Reply::Now(Err(ApiError::Malformed("missing field `user`".into()))));
        let (store, state) = store(api);

        block_on(store.initialize());

        assert_eq!(state.borrow().session, crate::models::fixtures::signed_out());
    }

    #[test]
    fn login_success_returns_user_and_sets_session() {
        let api = ScriptedApi::default();
        api.login.borrow_mut().push_back(Reply::Now(Ok(user(Role::Admin))));
        let (store, state) = store(api);

        let result = block_on(store.login(" john@example.com ", "password"));

        assert_eq!(result.map(|u| u.role), Ok(Role::Admin));
        assert_eq!(state.borrow().session.role(), Some(Role::Admin));
        let sent = store.api().last_login.borrow().clone().unwrap();
        assert_eq!(sent.email, "john@example.com");
    }

    #[test]
    fn login_failure_keeps_prior_session_and_clears_loading() {
        let api = ScriptedApi::default();
        api.check.borrow_mut().push_back(Reply::Now(Ok(user(Role::User))));
        api.login.borrow_mut().push_back(Reply::Now(Err(ApiError::Rejected {
            status: 400,
            message: Some("Invalid credentials".into()),
        })));
        let (store, state) = store(api);
        block_on(store.initialize());

        let result = block_on(store.login("john@example.com", "nope"));

        assert_eq!(
            result,
            Err(AuthFailure {
                message: "Invalid credentials".into()
            })
        );
        let s = state.borrow().session.clone();
        assert!(s.is_authenticated);
        assert!(!s.is_loading);
        assert_eq!(s.role(), Some(Role::User));
    }

    #[test]
    fn network_failure_is_a_result_not_a_panic() {
        let (store, state) = store(ScriptedApi::default());

        let result = block_on(store.register(SignupRequest::default()));

        assert!(result.unwrap_err().message.contains("Unable to reach"));
        assert!(!state.borrow().session.is_loading);
    }

    #[test]
    fn verify_email_sets_session_and_passes_message_through() {
        let api = ScriptedApi::default();
        api.verify.borrow_mut().push_back(Reply::Now(Ok(VerifyEmailResponse {
            user: user(Role::User),
            message: Some("Email verified successfully".into()),
        })));
        let (store, state) = store(api);

        let verified = block_on(store.verify_email("123456")).unwrap();

        assert_eq!(verified.message.as_deref(), Some("Email verified successfully"));
        assert!(state.borrow().session.is_authenticated);
    }

    #[test]
    fn logout_clears_even_when_request_fails() {
        let api = ScriptedApi::default();
        api.login.borrow_mut().push_back(Reply::Now(Ok(user(Role::User))));
        api.logout
            .borrow_mut()
            .push_back(Reply::Now(Err(ApiError::Network("offline".into()))));
        let (store, state) = store(api);
        block_on(store.login("john@example.com", "password")).unwrap();

        block_on(store.logout());

        let s = state.borrow().session.clone();
        assert!(!s.is_authenticated);
        assert!(s.user.is_none());
        assert!(!s.is_loading);
    }

    #[test]
    fn slow_logout_cannot_clear_a_later_login() {
        let (logout_tx, logout_rx) = oneshot::channel();
        let api = ScriptedApi::default();
        api.logout.borrow_mut().push_back(Reply::Deferred(logout_rx));
        api.login.borrow_mut().push_back(Reply::Now(Ok(user(Role::Admin))));
        let (store, state) = store(api);

        block_on(async {
            futures::join!(store.logout(), async {
                let logged_in = store.login("admin@example.com", "admin123").await;
                assert!(logged_in.is_ok());
                logout_tx.send(Ok(())).unwrap();
            });
        });

        let s = state.borrow().session.clone();
        assert!(s.is_authenticated);
        assert_eq!(s.role(), Some(Role::Admin));
    }

    #[test]
    fn slow_auth_check_cannot_override_a_login() {
        let (check_tx, check_rx) = oneshot::channel();
        let api = ScriptedApi::default();
        api.check.borrow_mut().push_back(Reply::Deferred(check_rx));
        api.login.borrow_mut().push_back(Reply::Now(Ok(user(Role::User))));
        let (store, state) = store(api);

        block_on(async {
            futures::join!(store.initialize(), async {
                store.login("john@example.com", "password").await.unwrap();
                check_tx
                    .send(Err(ApiError::Rejected {
                        status: 401,
                        message: None,
                    }))
                    .unwrap();
            });
        });

        assert!(state.borrow().session.is_authenticated);
    }

    #[test]
    fn every_operation_cancels_the_previous_request() {
        let api = ScriptedApi::default();
        api.check.borrow_mut().push_back(Reply::Now(Ok(user(Role::User))));
        let (store, _state) = store(api);

        block_on(store.initialize());
        block_on(store.logout());

        assert_eq!(store.api().cancels.get(), 2);
    }

    #[test]
    fn superseded_login_reports_failure() {
        let (login_tx, login_rx) = oneshot::channel();
        let api = ScriptedApi::default();
        api.login.borrow_mut().push_back(Reply::Deferred(login_rx));
        api.logout.borrow_mut().push_back(Reply::Now(Ok(())));
        let (store, state) = store(api);

        let (login, ()) = block_on(async {
            futures::join!(store.login("john@example.com", "password"), async {
                store.logout().await;
                login_tx.send(Ok(user(Role::User))).unwrap();
            })
        });

        assert!(login.is_err());
        assert!(!state.borrow().session.is_authenticated);
    }

    #[test]
    fn superseded_verification_reports_failure() {
        let (verify_tx, verify_rx) = oneshot::channel();
        let api = ScriptedApi::default();
        api.verify.borrow_mut().push_back(Reply::Deferred(verify_rx));
        api.check.borrow_mut().push_back(Reply::Now(Err(ApiError::Rejected {
            status: 401,
            message: None,
        })));
        let (store, state) = store(api);

        let (verified, ()) = block_on(async {
            futures::join!(store.verify_email("123456"), async {
                store.initialize().await;
                verify_tx
                    .send(Ok(VerifyEmailResponse {
                        user: user(Role::User),
                        message: None,
                    }))
                    .unwrap();
            })
        });

        assert!(verified.is_err());
        assert!(state.borrow().session.user.is_none());
    }

    #[test]
    fn shutdown_aborts_and_ignores_the_pending_check() {
        let (check_tx, check_rx) = oneshot::channel();
        let api = ScriptedApi::default();
        api.check.borrow_mut().push_back(Reply::Deferred(check_rx));
        let (store, state) = store(api);

        block_on(async {
            futures::join!(store.initialize(), async {
                store.shutdown();
                check_tx.send(Ok(user(Role::Admin))).unwrap();
            });
        });

        assert_eq!(store.api().cancels.get(), 2);
        assert!(!state.borrow().session.is_authenticated);
        assert!(state.borrow().session.user.is_none());
    }

    #[test]
    fn stale_tickets_are_ignored_by_the_reducer() {
        let state = SessionState::default()
            .apply(SessionAction::Started(1))
            .apply(SessionAction::Started(2))
            .apply(SessionAction::SignedIn(2, user(Role::User)))
            .apply(SessionAction::SignedOut(1));

        assert!(state.session.is_authenticated);
    }

    #[test]
    fn settled_only_turns_off_loading() {
        let state = SessionState::default()
            .apply(SessionAction::Started(1))
            .apply(SessionAction::Settled(1));

        assert!(!state.session.is_loading);
        assert!(state.session.user.is_none());
    }
}
