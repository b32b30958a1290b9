//! HTTP client for the task server.
//!
//! [`ApiClient`] is the only place that talks to the network. It owns the
//! base address, knows every endpoint path, and attaches the bearer
//! credential to outgoing requests.
//!
//! ## Credentials
//!
//! The client holds no token of its own. Before each request it asks the
//! [`CredentialStore`] for the current token and, when there is one, sends
//! it as `Authorization: Bearer <token>`. A login that happens after the
//! client was built is therefore picked up by the very next call, and a
//! logout stops the header from being sent without touching the client.
//!
//! ## Errors
//!
//! Calls return the decoded `data` payload or a [`RequestError`]: transport
//! failures, non-2xx statuses (with the server's message) and bodies that do
//! not match the expected schema. Nothing is retried.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskman::api::ApiClient;
//! use taskman::libs::credentials::MemoryCredentialStore;
//!
//! # async fn run() -> Result<(), taskman::api::RequestError> {
//! let api = ApiClient::new("http://localhost:5000/api/v1", Arc::new(MemoryCredentialStore::new()));
//! let session = api.login("ada", "secret").await?;
//! println!("logged in as {}", session.user.username);
//! # Ok(())
//! # }
//! ```

use crate::libs::category::{Category, CategoryDraft};
use crate::libs::credentials::CredentialStore;
use crate::libs::task::{Task, TaskDraft};
use crate::libs::user::User;
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client, Method, RequestBuilder, Response,
};
use serde::de::{DeserializeOwned, IgnoredAny};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub mod error;
pub mod schema;

pub use error::{ErrorKind, RequestError};
pub use schema::{LoginData, TasksPage};

use schema::{
    CategoriesData, CategoryData, Envelope, LoginRequest, SignupRequest, TaskData, TaskReplacement, UserData,
};

/// Base address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/v1";

const JSON: &str = "application/json";

/// Endpoint paths, relative to the base address.
pub mod endpoints {
    pub const LOGIN: &str = "/login";
    pub const SIGNUP: &str = "/signup";
    pub const LOGOUT: &str = "/logout";
    pub const USER: &str = "/user";
    pub const TASKS: &str = "/tasks";
    pub const CATEGORIES: &str = "/categories";
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The store the bearer token is read from.
    pub fn credentials(&self) -> Arc<dyn CredentialStore> {
        Arc::clone(&self.credentials)
    }

    // Auth

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginData, RequestError> {
        let body = LoginRequest { username, password };
        let response = self.send(self.request(Method::POST, endpoints::LOGIN).json(&body)).await?;
        Self::parse(endpoints::LOGIN, response).await
    }

    pub async fn signup(&self, username: &str, email: &str, password: &str) -> Result<(), RequestError> {
        let body = SignupRequest {
            username,
            email,
            password,
        };
        let response = self.send(self.request(Method::POST, endpoints::SIGNUP).json(&body)).await?;
        Self::parse::<IgnoredAny>(endpoints::SIGNUP, response).await?;
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), RequestError> {
        self.send(self.request(Method::POST, endpoints::LOGOUT)).await?;
        Ok(())
    }

    pub async fn current_user(&self) -> Result<User, RequestError> {
        let response = self.send(self.request(Method::GET, endpoints::USER)).await?;
        let data: UserData = Self::parse(endpoints::USER, response).await?;
        Ok(data.user)
    }

    // Tasks

    /// Fetches one page of tasks. `query` is sent as-is; callers are
    /// responsible for leaving out unset filters.
    pub async fn list_tasks(&self, query: &[(&str, String)]) -> Result<TasksPage, RequestError> {
        let response = self.send(self.request(Method::GET, endpoints::TASKS).query(query)).await?;
        Self::parse(endpoints::TASKS, response).await
    }

    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, RequestError> {
        let response = self.send(self.request(Method::POST, endpoints::TASKS).json(draft)).await?;
        let data: TaskData = Self::parse(endpoints::TASKS, response).await?;
        Ok(data.task)
    }

    pub async fn update_task(&self, id: &str, draft: &TaskDraft) -> Result<Task, RequestError> {
        let path = format!("{}/{}", endpoints::TASKS, id);
        let body = TaskReplacement::from(draft);
        let response = self.send(self.request(Method::PUT, &path).json(&body)).await?;
        let data: TaskData = Self::parse(endpoints::TASKS, response).await?;
        Ok(data.task)
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), RequestError> {
        let path = format!("{}/{}", endpoints::TASKS, id);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    // Categories

    pub async fn list_categories(&self) -> Result<Vec<Category>, RequestError> {
        let response = self.send(self.request(Method::GET, endpoints::CATEGORIES)).await?;
        let data: CategoriesData = Self::parse(endpoints::CATEGORIES, response).await?;
        Ok(data.categories)
    }

    pub async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, RequestError> {
        let response = self.send(self.request(Method::POST, endpoints::CATEGORIES).json(draft)).await?;
        let data: CategoryData = Self::parse(endpoints::CATEGORIES, response).await?;
        Ok(data.category)
    }

    pub async fn delete_category(&self, id: &str) -> Result<(), RequestError> {
        let path = format!("{}/{}", endpoints::CATEGORIES, id);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    /// Builds a request with the JSON headers and, if a token is stored at
    /// this moment, the bearer header.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "api request");
        let builder = self.client.request(method, url).header(CONTENT_TYPE, JSON).header(ACCEPT, JSON);
        match self.credentials.load() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, RequestError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(RequestError::Status {
            status,
            message: error::server_message(status, &body),
        })
    }

    async fn parse<T: DeserializeOwned>(endpoint: &'static str, response: Response) -> Result<T, RequestError> {
        let body = response.bytes().await?;
        let envelope: Envelope<T> =
            serde_json::from_slice(&body).map_err(|source| RequestError::Deserialization { endpoint, source })?;
        Ok(envelope.data)
    }
}
