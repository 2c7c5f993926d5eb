//! Supabase HTTP client with bearer-token authentication
//!
//! Wraps the two service surfaces the tracker talks to: the GoTrue auth
//! endpoints under `/auth/v1` and the PostgREST data endpoints under
//! `/rest/v1`. Row-level security on the remote tables restricts every
//! data operation to rows owned by the signed-in user.

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client, Response,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{watch, RwLock};
use tracing::{debug, error, instrument};
use trackr_core::{AuthSession, AuthUser, Error, Result, SignUpResponse};

/// HTTP client for the Supabase backend
///
/// Holds the current auth session and broadcasts session changes on a
/// watch channel so observers can react to sign-in/sign-out.
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: String,
    session: RwLock<Option<AuthSession>>,
    session_tx: watch::Sender<Option<AuthUser>>,
}

impl SupabaseClient {
    /// Create a new client for the given project URL and anon key
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        let http = Client::builder()
            .build()
            .expect("Failed to create HTTP client");
        let (session_tx, _) = watch::channel(None);

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            session: RwLock::new(None),
            session_tx,
        }
    }

    /// Subscribe to session changes (None means signed out)
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.session_tx.subscribe()
    }

    /// The current session, if signed in
    pub async fn session(&self) -> Option<AuthSession> {
        self.session.read().await.clone()
    }

    /// The current user identity, if signed in
    pub async fn current_user(&self) -> Option<AuthUser> {
        self.session.read().await.as_ref().map(|s| s.user.clone())
    }

    /// The user id gating all store operations
    pub async fn require_user_id(&self) -> Result<String> {
        self.current_user()
            .await
            .map(|u| u.id)
            .ok_or_else(|| Error::AuthenticationError("Not signed in".to_string()))
    }

    async fn set_session(&self, session: Option<AuthSession>) {
        let user = session.as_ref().map(|s| s.user.clone());
        *self.session.write().await = session;
        let _ = self.session_tx.send(user);
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Headers for unauthenticated auth-endpoint calls
    fn anon_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.anon_key) {
            headers.insert("apikey", value);
        }
        headers
    }

    /// Headers for data calls: anon key plus the user's bearer token
    async fn bearer_headers(&self) -> Result<HeaderMap> {
        let session = self.session.read().await;
        let session = session
            .as_ref()
            .ok_or_else(|| Error::AuthenticationError("Not signed in".to_string()))?;

        let mut headers = self.anon_headers();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", session.access_token))
                .map_err(|e| Error::InvalidData(e.to_string()))?,
        );
        Ok(headers)
    }

    /// Check if a response indicates authentication failure
    fn check_auth_error(response: &Response) -> Option<Error> {
        match response.status().as_u16() {
            401 => Some(Error::SessionExpired),
            403 => Some(Error::AuthenticationError("Access forbidden".to_string())),
            _ => None,
        }
    }

    // ─── Auth operations ─────────────────────────────────────────────

    /// Register a new account. Depending on project settings the user
    /// may be signed in immediately; the returned session is None when
    /// email confirmation is still pending.
    #[instrument(skip(self, password))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Option<AuthSession>> {
        let url = self.auth_url("signup");
        debug!("Signing up {}", email);

        let response = self
            .http
            .post(&url)
            .headers(self.anon_headers())
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| Error::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Sign-up failed: HTTP {} - {}", status, body);
            return Err(Error::AuthenticationError(format!("HTTP {}: {}", status, body)));
        }

        let data: SignUpResponse = response.json().await.map_err(|e| {
            error!("Failed to parse sign-up response: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        let session = data.into_session();
        if let Some(ref s) = session {
            debug!("Sign-up returned an active session for {}", s.user.id);
            self.set_session(Some(s.clone())).await;
        }
        Ok(session)
    }

    /// Sign in with email and password
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let url = format!("{}?grant_type=password", self.auth_url("token"));
        debug!("Signing in {}", email);

        let response = self
            .http
            .post(&url)
            .headers(self.anon_headers())
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| Error::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Sign-in failed: HTTP {} - {}", status, body);
            return Err(Error::AuthenticationError(format!("HTTP {}: {}", status, body)));
        }

        let session: AuthSession = response.json().await.map_err(|e| {
            error!("Failed to parse sign-in response: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        debug!("Signed in as {}", session.user.id);
        self.set_session(Some(session.clone())).await;
        Ok(session)
    }

    /// Exchange a saved refresh token for a fresh session
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession> {
        let url = format!("{}?grant_type=refresh_token", self.auth_url("token"));
        debug!("Refreshing session");

        let response = self
            .http
            .post(&url)
            .headers(self.anon_headers())
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| Error::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Session refresh failed: HTTP {} - {}", status, body);
            return Err(Error::SessionExpired);
        }

        let session: AuthSession = response.json().await.map_err(|e| {
            error!("Failed to parse refresh response: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        debug!("Session refreshed for {}", session.user.id);
        self.set_session(Some(session.clone())).await;
        Ok(session)
    }

    /// Sign out. The local session is cleared even if the revoke call
    /// fails.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<()> {
        let headers = self.bearer_headers().await;
        self.set_session(None).await;

        if let Ok(headers) = headers {
            let url = self.auth_url("logout");
            let result = self.http.post(&url).headers(headers).send().await;
            if let Err(e) = result {
                error!("Logout request failed: {}", e);
                return Err(Error::NetworkError(e.to_string()));
            }
        }
        debug!("Signed out");
        Ok(())
    }

    // ─── Data operations (PostgREST) ─────────────────────────────────

    /// GET rows from a table. The caller supplies the PostgREST query
    /// string, always including the `user_id` scope.
    pub(crate) async fn rest_get<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .http
            .get(self.rest_url(table))
            .headers(self.bearer_headers().await?)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::StoreError(e.to_string()))?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let response = response.error_for_status().map_err(|e| {
            error!("List request for {} failed: {}", table, e);
            Error::StoreError(e.to_string())
        })?;

        response.json::<T>().await.map_err(|e| {
            error!("Failed to parse {} rows: {}", table, e);
            Error::InvalidData(e.to_string())
        })
    }

    /// INSERT a row, returning the stored representation
    pub(crate) async fn rest_insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T> {
        let mut headers = self.bearer_headers().await?;
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let response = self
            .http
            .post(self.rest_url(table))
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::StoreError(e.to_string()))?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let response = response.error_for_status().map_err(|e| {
            error!("Insert into {} failed: {}", table, e);
            Error::StoreError(e.to_string())
        })?;

        response.json::<T>().await.map_err(|e| {
            error!("Failed to parse inserted {} row: {}", table, e);
            Error::InvalidData(e.to_string())
        })
    }

    /// PATCH the row with the given id
    pub(crate) async fn rest_update<B: Serialize>(
        &self,
        table: &str,
        id: &str,
        body: &B,
    ) -> Result<()> {
        let response = self
            .http
            .patch(self.rest_url(table))
            .headers(self.bearer_headers().await?)
            .query(&[("id", format!("eq.{}", id))])
            .json(body)
            .send()
            .await
            .map_err(|e| Error::StoreError(e.to_string()))?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        response.error_for_status().map_err(|e| {
            error!("Update of {} id {} failed: {}", table, id, e);
            Error::StoreError(e.to_string())
        })?;
        Ok(())
    }

    /// DELETE the row with the given id
    pub(crate) async fn rest_delete(&self, table: &str, id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.rest_url(table))
            .headers(self.bearer_headers().await?)
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await
            .map_err(|e| Error::StoreError(e.to_string()))?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        response.error_for_status().map_err(|e| {
            error!("Delete of {} id {} failed: {}", table, id, e);
            Error::StoreError(e.to_string())
        })?;
        Ok(())
    }
}
