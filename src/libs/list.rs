//! Paginated, filterable list of a server-side resource.
//!
//! [`ListController`] keeps one page of a resource cached locally and keeps
//! it in step with the server: every successful write is followed by a
//! refetch of the current page, so ordering and page membership are always
//! decided by the server. A failed operation leaves the cached page, the
//! cursor and the filters exactly as they were.
//!
//! A write that the server accepted is reported as successful even when the
//! refetch after it fails. The old page stays cached and the controller is
//! marked [`ListStatus::Stale`] until the next successful refresh.
//!
//! The controller is generic over a [`Resource`] binding. Tasks and
//! categories share the same implementation and only differ in their
//! endpoints, required fields and page size.
//!
//! All operations take `&mut self`, so a refresh can never interleave with
//! another operation on the same controller and a stale response cannot
//! overwrite newer state.

use crate::api::{ApiClient, RequestError};
use std::fmt::Debug;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Anything with a server-issued identifier.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Filter set that knows how to render itself as query parameters.
///
/// Implementations must leave unset fields out entirely rather than send
/// them as empty strings, so that the server's "no filter" default applies.
pub trait QueryFilter: Clone + Default + Debug {
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

impl QueryFilter for () {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// One page as returned by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// A complete, unpaginated result.
    pub fn single(items: Vec<T>) -> Self {
        Self { items, total_pages: 1 }
    }
}

/// Parameters of a single list request.
#[derive(Debug)]
pub struct PageQuery<'a, F> {
    pub page: u32,
    pub limit: Option<u32>,
    pub filter: &'a F,
}

impl<F: QueryFilter> PageQuery<'_, F> {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string())];
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs.extend(
            self.filter
                .query_pairs()
                .into_iter()
                .filter(|(_, value)| !value.trim().is_empty()),
        );
        pairs
    }
}

/// Binds a resource type to its endpoints and local rules.
#[allow(async_fn_in_trait)]
pub trait Resource {
    type Item: Identified + Clone + Debug;
    type Draft: Clone + Debug;
    type Filter: QueryFilter;

    /// Singular name used in logs and messages.
    const NAME: &'static str;

    /// Page size sent as `limit`, `None` for unpaginated resources.
    const PAGE_SIZE: Option<u32>;

    /// Whether items can be put into edit mode and updated.
    const EDITABLE: bool;

    /// Required fields that are empty in `draft`.
    fn missing_fields(draft: &Self::Draft) -> Vec<&'static str>;

    /// Editable copy of a stored item.
    fn draft_from(item: &Self::Item) -> Self::Draft;

    async fn fetch(api: &ApiClient, query: &PageQuery<'_, Self::Filter>) -> Result<Page<Self::Item>, ListError>;

    async fn create(api: &ApiClient, draft: &Self::Draft) -> Result<Self::Item, ListError>;

    async fn update(api: &ApiClient, id: &str, draft: &Self::Draft) -> Result<Self::Item, ListError>;

    async fn delete(api: &ApiClient, id: &str) -> Result<(), ListError>;
}

#[derive(Debug, Error)]
pub enum ListError {
    #[error("{resource} is missing required fields: {}", .fields.join(", "))]
    Validation {
        resource: &'static str,
        fields: Vec<&'static str>,
    },
    #[error("{resource} '{id}' was not found")]
    NotFound { resource: &'static str, id: String },
    #[error("no {resource} is being edited")]
    NotEditing { resource: &'static str },
    #[error("{resource} '{id}' is already being edited")]
    EditInProgress { resource: &'static str, id: String },
    #[error("{resource} does not support {operation}")]
    Unsupported {
        resource: &'static str,
        operation: &'static str,
    },
    #[error(transparent)]
    Request(#[from] RequestError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    /// No fetch has completed yet.
    Loading,
    Ready,
    /// A write went through but the page could not be refetched after it.
    Stale,
}

/// The single item currently in edit mode.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSlot<D> {
    pub id: String,
    pub draft: D,
}

#[derive(Debug)]
pub struct ListController<R: Resource> {
    api: ApiClient,
    items: Vec<R::Item>,
    current_page: u32,
    total_pages: u32,
    filter: R::Filter,
    editing: Option<EditSlot<R::Draft>>,
    status: ListStatus,
}

impl<R: Resource> ListController<R> {
    pub fn new(api: &ApiClient) -> Self {
        Self {
            api: api.clone(),
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            filter: R::Filter::default(),
            editing: None,
            status: ListStatus::Loading,
        }
    }

    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn filter(&self) -> &R::Filter {
        &self.filter
    }

    pub fn status(&self) -> ListStatus {
        self.status
    }

    pub fn editing(&self) -> Option<&EditSlot<R::Draft>> {
        self.editing.as_ref()
    }

    pub fn get(&self, id: &str) -> Option<&R::Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Refetches the current page with the active filters.
    ///
    /// Items and page count are replaced together. If the server reports
    /// fewer pages than the cursor points at (the list shrank), the cursor
    /// moves to the last page and that page is fetched instead, repeatedly
    /// until the fetched page is within the reported range.
    pub async fn refresh(&mut self) -> Result<(), ListError> {
        let mut page_number = self.current_page;
        let mut page = self.fetch(page_number).await.inspect_err(|err| Self::report("refresh", err))?;

        while page_number > page.total_pages.max(1) {
            let total_pages = page.total_pages.max(1);
            debug!(resource = R::NAME, page = page_number, total_pages, "page out of range, moving to last page");
            page_number = total_pages;
            page = self.fetch(page_number).await.inspect_err(|err| Self::report("refresh", err))?;
        }

        self.total_pages = page.total_pages.max(1);
        self.current_page = page_number;
        self.items = page.items;
        self.status = ListStatus::Ready;
        Ok(())
    }

    /// Creates an item and refetches. Drafts with empty required fields are
    /// rejected without contacting the server.
    pub async fn create(&mut self, draft: &R::Draft) -> Result<R::Item, ListError> {
        Self::validate(draft).inspect_err(|err| Self::report("create", err))?;
        let created = R::create(&self.api, draft).await.inspect_err(|err| Self::report("create", err))?;
        debug!(resource = R::NAME, id = created.id(), "created");
        self.refresh_after_write("create").await;
        Ok(created)
    }

    /// Puts the item with `id` from the current page into edit mode and
    /// returns its editable draft. Any previous edit is abandoned.
    pub fn begin_edit(&mut self, id: &str) -> Result<&mut R::Draft, ListError> {
        if !R::EDITABLE {
            return Err(ListError::Unsupported {
                resource: R::NAME,
                operation: "update",
            });
        }
        let item = self.get(id).ok_or_else(|| ListError::NotFound {
            resource: R::NAME,
            id: id.to_string(),
        })?;
        let slot = EditSlot {
            id: id.to_string(),
            draft: R::draft_from(item),
        };
        Ok(&mut self.editing.insert(slot).draft)
    }

    pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
        self.editing.as_mut().map(|slot| &mut slot.draft)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Submits the draft held in edit mode.
    pub async fn submit_edit(&mut self) -> Result<R::Item, ListError> {
        let Some(slot) = self.editing.clone() else {
            return Err(ListError::NotEditing { resource: R::NAME });
        };
        self.update(&slot.id, &slot.draft).await
    }

    /// Replaces the stored record `id` with `draft`, leaves edit mode and
    /// refetches. Fails without a request while a different item is being
    /// edited.
    pub async fn update(&mut self, id: &str, draft: &R::Draft) -> Result<R::Item, ListError> {
        if let Some(slot) = &self.editing {
            if slot.id != id {
                let err = ListError::EditInProgress {
                    resource: R::NAME,
                    id: slot.id.clone(),
                };
                Self::report("update", &err);
                return Err(err);
            }
        }
        Self::validate(draft).inspect_err(|err| Self::report("update", err))?;
        let updated = R::update(&self.api, id, draft).await.inspect_err(|err| Self::report("update", err))?;
        self.editing = None;
        self.refresh_after_write("update").await;
        Ok(updated)
    }

    /// Deletes `id` on the server, then refetches. Nothing is removed locally
    /// before the server confirms.
    pub async fn delete(&mut self, id: &str) -> Result<(), ListError> {
        R::delete(&self.api, id).await.inspect_err(|err| Self::report("delete", err))?;
        if self.editing.as_ref().is_some_and(|slot| slot.id == id) {
            self.editing = None;
        }
        self.refresh_after_write("delete").await;
        Ok(())
    }

    /// Applies a partial change to the filters and refetches.
    pub async fn set_filter(&mut self, change: impl FnOnce(&mut R::Filter)) -> Result<(), ListError> {
        change(&mut self.filter);
        self.refresh().await
    }

    /// Drops every filter, returns to the first page and refetches.
    pub async fn clear_filters(&mut self) -> Result<(), ListError> {
        self.filter = R::Filter::default();
        self.current_page = 1;
        self.refresh().await
    }

    /// Moves to page `page`, clamped to `[1, total_pages]`, and refetches.
    pub async fn set_page(&mut self, page: u32) -> Result<(), ListError> {
        self.current_page = page.clamp(1, self.total_pages);
        self.refresh().await
    }

    pub async fn next_page(&mut self) -> Result<(), ListError> {
        self.set_page(self.current_page.saturating_add(1)).await
    }

    pub async fn previous_page(&mut self) -> Result<(), ListError> {
        self.set_page(self.current_page.saturating_sub(1)).await
    }

    /// Walks the pages from the first one until the page holding `id` is
    /// loaded. Returns `false`, positioned on the last page, when no page
    /// holds it.
    pub async fn seek(&mut self, id: &str) -> Result<bool, ListError> {
        self.current_page = 1;
        self.refresh().await?;
        loop {
            if self.get(id).is_some() {
                return Ok(true);
            }
            if self.current_page >= self.total_pages {
                return Ok(false);
            }
            self.next_page().await?;
        }
    }

    async fn refresh_after_write(&mut self, operation: &'static str) {
        if let Err(err) = self.refresh().await {
            warn!(resource = R::NAME, operation, error = %err, "write succeeded but the list could not be refetched");
            self.status = ListStatus::Stale;
        }
    }

    async fn fetch(&self, page: u32) -> Result<Page<R::Item>, ListError> {
        let query = PageQuery {
            page,
            limit: R::PAGE_SIZE,
            filter: &self.filter,
        };
        R::fetch(&self.api, &query).await
    }

    fn validate(draft: &R::Draft) -> Result<(), ListError> {
        let fields = R::missing_fields(draft);
        if fields.is_empty() {
            Ok(())
        } else {
            Err(ListError::Validation {
                resource: R::NAME,
                fields,
            })
        }
    }

    fn report(operation: &'static str, err: &ListError) {
        error!(resource = R::NAME, operation, error = %err, "list operation failed");
    }
}
