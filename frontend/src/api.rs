use std::cell::RefCell;

use gloo_net::http::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use web_sys::{AbortController, RequestCredentials};

use crate::models::{
    LoginRequest, SignupRequest, User, UserEnvelope, VerifyEmailRequest, VerifyEmailResponse,
};

/* Base URL of the auth API, fixed at build time */
pub const API_BASE: &str = match option_env!("URBANFIX_API_URL") {
    Some(url) => url,
    None => "http://localhost:3000/api",
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },
    #[error("unexpected response: {0}")]
    Malformed(String),
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Text shown inline by the forms.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ApiError::Rejected { status: 401, .. } => "Invalid credentials".into(),
            ApiError::Rejected { .. } => "The server refused the request. Please try again.".into(),
            ApiError::Network(_) => "Unable to reach the server. Check your connection.".into(),
            ApiError::Malformed(_) => "Unexpected response from the server.".into(),
            ApiError::Cancelled => "The request was cancelled.".into(),
        }
    }
}

impl ApiError {
    /// Classifies a DOM exception raised by `fetch`.
    fn from_js(name: &str, detail: String) -> Self {
        match name {
            "AbortError" => ApiError::Cancelled,
            _ => ApiError::Network(detail),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::JsError(e) => ApiError::from_js(&e.name, e.to_string()),
            gloo_net::Error::SerdeError(e) => ApiError::Malformed(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// The five auth endpoints the session store depends on.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    async fn check_auth(&self) -> Result<User, ApiError>;
    async fn login(&self, body: &LoginRequest) -> Result<User, ApiError>;
    async fn signup(&self, body: &SignupRequest) -> Result<User, ApiError>;
    async fn verify_email(&self, body: &VerifyEmailRequest)
        -> Result<VerifyEmailResponse, ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;

    /// Abort whatever request is still in flight.
    fn cancel_pending(&self) {}
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/* -------------------------------------------------------------------------- */
/*                           gloo-net implementation                          */
/* -------------------------------------------------------------------------- */

pub struct HttpAuthApi {
    base: String,
    in_flight: RefCell<Option<AbortController>>,
}

impl Default for HttpAuthApi {
    fn default() -> Self {
        Self::new(API_BASE)
    }
}

impl HttpAuthApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            in_flight: RefCell::new(None),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /* Generic credential-bearing JSON call */
    async fn call<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let controller = AbortController::new().ok();
        let builder = RequestBuilder::new(&self.url(path))
            .method(method)
            .credentials(RequestCredentials::Include)
            .abort_signal(controller.as_ref().map(|c| c.signal()).as_ref());
        self.in_flight.replace(controller);

        let request = match body {
            Some(b) => builder.json(b)?,
            None => builder.build()?,
        };
        let resp = request.send().await?;

        if !resp.ok() {
            let status = resp.status();
            let message = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message);
            return Err(ApiError::Rejected { status, message });
        }

        resp.json::<T>().await.map_err(ApiError::from)
    }
}

impl AuthApi for HttpAuthApi {
    async fn check_auth(&self) -> Result<User, ApiError> {
        let env: UserEnvelope = self.call::<(), _>(Method::GET, "/auth/check-auth", None).await?;
        Ok(env.user)
    }

    async fn login(&self, body: &LoginRequest) -> Result<User, ApiError> {
        let env: UserEnvelope = self.call(Method::POST, "/auth/login", Some(body)).await?;
        Ok(env.user)
    }

    async fn signup(&self, body: &SignupRequest) -> Result<User, ApiError> {
        let env: UserEnvelope = self.call(Method::POST, "/auth/signup", Some(body)).await?;
        Ok(env.user)
    }

    async fn verify_email(
        &self,
        body: &VerifyEmailRequest,
    ) -> Result<VerifyEmailResponse, ApiError> {
        self.call(Method::POST, "/auth/verify-email", Some(body)).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        // body is `{}`, nothing worth decoding
        let _: serde_json::Value = self.call::<(), _>(Method::POST, "/auth/logout", None).await?;
        Ok(())
    }

    fn cancel_pending(&self) {
        if let Some(controller) = self.in_flight.take() {
            controller.abort();
        }
    }
}
