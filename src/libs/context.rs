//! Explicit application context.
//!
//! Commands receive an [`AppContext`] instead of reaching for global state.
//! It bundles the API client and the session store built on the same
//! credential store, and hands out list controllers bound to that client.

use super::category::Categories;
use super::config::Config;
use super::credentials::{CredentialStore, FileCredentialStore};
use super::data_storage::DataStorage;
use super::guard::{self, Guard, View};
use super::list::ListController;
use super::session::{SessionState, SessionStore};
use super::task::Tasks;
use crate::api::ApiClient;
use anyhow::Result;
use std::sync::Arc;

#[derive(Debug)]
pub struct AppContext {
    pub api: ApiClient,
    pub session: SessionStore,
}

impl AppContext {
    pub fn new(api: ApiClient) -> Self {
        let session = SessionStore::new(&api);
        Self { api, session }
    }

    /// Builds the context from configuration, with the credential persisted
    /// in `storage`.
    pub fn from_config(config: &Config, storage: &DataStorage) -> Result<Self> {
        let credentials: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new(storage)?);
        Ok(Self::new(ApiClient::new(config.api_url(), credentials)))
    }

    /// Starts the session lifecycle; see [`SessionStore::init`].
    pub async fn init(&mut self) -> SessionState {
        self.session.init().await
    }

    pub fn dispose(&mut self) {
        self.session.dispose();
    }

    pub fn guard(&self, view: View) -> Guard {
        guard::guard(view, self.session.state())
    }

    pub fn tasks(&self) -> ListController<Tasks> {
        ListController::new(&self.api)
    }

    pub fn categories(&self) -> ListController<Categories> {
        ListController::new(&self.api)
    }
}
