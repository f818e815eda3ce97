//! HTTP gateway to the taskhub REST API.
//!
//! Attaches the bearer token from session state to every request, converts
//! standardized error shapes into [`ApiError`], and performs the
//! cross-cutting handling (notification banner, session teardown on
//! authentication failure) before re-raising every fault to the caller.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error};
use url::Url;

use crate::{
    config::ApiConfig,
    error::{ApiError, map_reqwest_error},
    notification::NotificationService,
    session::SessionStore,
};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: SessionStore,
    notifier: NotificationService,
}

impl ApiClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(
        config: ApiConfig,
        session: SessionStore,
        notifier: NotificationService,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(concat!("taskhub-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url,
            session,
            notifier,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn notifier(&self) -> &NotificationService {
        &self.notifier
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.http.get(self.endpoint(path)), None).await
    }

    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.http.get(self.endpoint(path)).query(query), None)
            .await
    }

    /// GET with an explicit bearer token, bypassing session state. Used while
    /// logging in, when the token exists but the session is not yet stored.
    pub async fn get_with_token<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, ApiError> {
        self.send(self.http.get(self.endpoint(path)), Some(token))
            .await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.http.post(self.endpoint(path)).json(body), None)
            .await
    }

    /// POST with no payload, body ignored. Used for the logout call.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.dispatch(self.http.post(self.endpoint(path)), None)
            .await
            .map(drop)
    }

    /// POST a URL-encoded form. Used only for the login call.
    pub async fn post_form<T, F>(&self, path: &str, form: &F) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: Serialize + ?Sized,
    {
        self.send(self.http.post(self.endpoint(path)).form(form), None)
            .await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.http.put(self.endpoint(path)).json(body), None)
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.dispatch(self.http.delete(self.endpoint(path)), None)
            .await
            .map(drop)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        token_override: Option<&str>,
    ) -> Result<T, ApiError> {
        let res = self.dispatch(req, token_override).await?;
        res.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn dispatch(
        &self,
        req: RequestBuilder,
        token_override: Option<&str>,
    ) -> Result<Response, ApiError> {
        let req = match token_override {
            Some(token) => req.bearer_auth(token),
            None => match self.session.token() {
                Some(token) => req.bearer_auth(token),
                None => req,
            },
        };

        let res = match req.send().await {
            Ok(res) => res,
            Err(e) => {
                let err = map_reqwest_error(e);
                self.report(&err);
                return Err(err);
            }
        };

        let status = res.status();
        if status.is_success() {
            debug!(status = status.as_u16(), url = %res.url(), "api response");
            return Ok(res);
        }

        let url = res.url().clone();
        let body = res.text().await.unwrap_or_default();
        let err = self.classify(status, &body);
        error!(status = status.as_u16(), url = %url, error = %err, "api request failed");
        self.report(&err);
        Err(err)
    }

    fn classify(&self, status: StatusCode, body: &str) -> ApiError {
        if status == StatusCode::UNAUTHORIZED {
            if self.session.is_authenticated() {
                // an established session was rejected
                return ApiError::AuthenticationExpired;
            }
            // unauthenticated 401 (bad login credentials): surface the
            // server detail instead of tearing down a session we don't have
            return ApiError::from_response(status, body);
        }
        ApiError::from_response(status, body)
    }

    fn report(&self, err: &ApiError) {
        if matches!(err, ApiError::AuthenticationExpired) {
            self.session.expire();
        }
        self.notifier.error(err.user_message());
    }
}
