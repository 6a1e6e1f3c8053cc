//! Page operations shared by the CLI and the form server.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::Transport;
use crate::config::Settings;
use crate::error::NotesError;
use crate::models::{CreatePageRequest, Page, PageList, UpdatePageRequest};

/// Batch size requested from the listing endpoint.
pub const PAGE_LIMIT: u32 = 25;

pub struct PageService<'a, T: Transport + ?Sized> {
    transport: &'a T,
    settings: &'a Settings,
}

impl<'a, T: Transport + ?Sized> PageService<'a, T> {
    pub fn new(transport: &'a T, settings: &'a Settings) -> Self {
        PageService {
            transport,
            settings,
        }
    }

    /// Endpoint of the first listing batch for the configured space.
    pub fn first_list_endpoint(&self, with_body: bool) -> String {
        let mut endpoint = format!(
            "/pages?space-id={}&limit={}",
            self.settings.space_id, PAGE_LIMIT
        );
        if with_body {
            endpoint.push_str("&body-format=storage");
        }
        endpoint
    }

    pub async fn fetch_batch(&self, endpoint: &str) -> Result<PageList, NotesError> {
        self.call(Method::GET, endpoint, None).await
    }

    /// Every page in the space, following next links until the service
    /// stops sending one. There is no upper bound on the number of batches.
    pub async fn fetch_all(&self) -> Result<Vec<Page>, NotesError> {
        let mut pages = Vec::new();
        let mut endpoint = self.first_list_endpoint(true);
        let mut batches = 0usize;
        loop {
            let list = self.fetch_batch(&endpoint).await?;
            batches += 1;
            let next = list.next_endpoint().map(str::to_string);
            pages.extend(list.results);
            match next {
                Some(next) => endpoint = next,
                None => break,
            }
        }
        tracing::debug!(batches, pages = pages.len(), "fetched page listing");
        Ok(pages)
    }

    pub async fn get(&self, id: &str, with_body: bool) -> Result<Page, NotesError> {
        let mut endpoint = page_endpoint(id)?;
        if with_body {
            endpoint.push_str("?body-format=storage");
        }
        self.call(Method::GET, &endpoint, None).await
    }

    /// Create a page under the configured space and parent page.
    pub async fn create(&self, title: &str, content: &str) -> Result<Page, NotesError> {
        let req = CreatePageRequest::new(
            &self.settings.space_id,
            &self.settings.parent_page_id,
            title,
            content,
        );
        let page: Page = self.call(Method::POST, "/pages", Some(encode(&req)?)).await?;
        tracing::info!(id = %page.id, title = %page.title, "page created");
        Ok(page)
    }

    /// Replace title and content of page `id`. The current version is
    /// fetched first and the update is submitted as that version plus
    /// one; conflicts are left to the remote service. Returns the
    /// submitted version number.
    pub async fn update(
        &self,
        id: &str,
        title: &str,
        content: &str,
        message: &str,
    ) -> Result<u64, NotesError> {
        let endpoint = page_endpoint(id)?;
        let current = self.get(id, false).await?;
        let version = current.version.number + 1;
        let req = UpdatePageRequest::new(id, title, content, version, message);
        self.transport
            .request(Method::PUT, &endpoint, Some(&encode(&req)?))
            .await?;
        tracing::info!(%id, version, "page updated");
        Ok(version)
    }

    pub async fn delete(&self, id: &str) -> Result<(), NotesError> {
        let endpoint = page_endpoint(id)?;
        self.transport.request(Method::DELETE, &endpoint, None).await?;
        tracing::info!(%id, "page deleted");
        Ok(())
    }

    async fn call<R: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<R, NotesError> {
        let text = self.transport.request(method, endpoint, body.as_ref()).await?;
        serde_json::from_str(&text).map_err(NotesError::Decode)
    }
}

/// `/pages/{id}` with the id percent-encoded as a single path segment, so
/// it can never add segments or a query to the request.
pub fn page_endpoint(id: &str) -> Result<String, NotesError> {
    if id.is_empty() || id == "." || id == ".." {
        return Err(NotesError::validation(format!("invalid page ID: {:?}", id)));
    }
    Ok(format!("/pages/{}", urlencoding::encode(id)))
}

fn encode<B: Serialize>(body: &B) -> Result<serde_json::Value, NotesError> {
    serde_json::to_value(body).map_err(NotesError::Encode)
}
