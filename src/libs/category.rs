//! Task categories.
//!
//! The category list is small and unpaginated: the server returns every
//! category in one response, so the list controller always sees a single
//! page. Categories can be created and deleted but not edited.

use super::list::{Identified, ListError, Page, PageQuery, Resource};
use crate::api::ApiClient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
}

impl Identified for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Request body for `POST /categories`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryDraft {
    pub name: String,
}

impl CategoryDraft {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

/// Category list binding for [`ListController`](super::list::ListController).
#[derive(Debug)]
pub struct Categories;

impl Resource for Categories {
    type Item = Category;
    type Draft = CategoryDraft;
    type Filter = ();

    const NAME: &'static str = "category";
    const PAGE_SIZE: Option<u32> = None;
    const EDITABLE: bool = false;

    fn missing_fields(draft: &CategoryDraft) -> Vec<&'static str> {
        if draft.name.trim().is_empty() {
            vec!["name"]
        } else {
            Vec::new()
        }
    }

    fn draft_from(item: &Category) -> CategoryDraft {
        CategoryDraft::new(&item.name)
    }

    async fn fetch(api: &ApiClient, _query: &PageQuery<'_, ()>) -> Result<Page<Category>, ListError> {
        let categories = api.list_categories().await?;
        Ok(Page::single(categories))
    }

    async fn create(api: &ApiClient, draft: &CategoryDraft) -> Result<Category, ListError> {
        Ok(api.create_category(draft).await?)
    }

    async fn update(_api: &ApiClient, _id: &str, _draft: &CategoryDraft) -> Result<Category, ListError> {
        Err(ListError::Unsupported {
            resource: Self::NAME,
            operation: "update",
        })
    }

    async fn delete(api: &ApiClient, id: &str) -> Result<(), ListError> {
        Ok(api.delete_category(id).await?)
    }
}
