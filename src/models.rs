// Wire shapes for the wiki v2 page API. Decoding is lenient: fields the
// service leaves out fall back to their defaults.

use serde::{Deserialize, Serialize};

/// Representation every body is sent and requested in.
pub const STORAGE_REPRESENTATION: &str = "storage";
/// Status given to pages created or updated by this client.
pub const CURRENT_STATUS: &str = "current";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StorageBody {
    pub value: String,
    pub representation: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PageBody {
    pub storage: StorageBody,
}

impl PageBody {
    /// Wrap page content in the storage representation.
    pub fn storage(value: impl Into<String>) -> Self {
        PageBody {
            storage: StorageBody {
                value: value.into(),
                representation: STORAGE_REPRESENTATION.to_string(),
            },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PageVersion {
    pub number: u64,
}

/// A page as returned by `GET /pages` and `GET /pages/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    pub status: String,
    pub space_id: String,
    pub body: PageBody,
    pub version: PageVersion,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Links {
    pub next: String,
}

/// One batch of a paginated page listing.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PageList {
    pub results: Vec<Page>,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl PageList {
    /// The endpoint of the following batch, used verbatim. `None` once
    /// the service stops sending a next link.
    pub fn next_endpoint(&self) -> Option<&str> {
        if self.links.next.is_empty() {
            None
        } else {
            Some(&self.links.next)
        }
    }
}

/// Body of `POST /pages`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageRequest {
    pub space_id: String,
    pub status: String,
    pub title: String,
    pub parent_id: String,
    pub body: PageBody,
}

impl CreatePageRequest {
    pub fn new(
        space_id: impl Into<String>,
        parent_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        CreatePageRequest {
            space_id: space_id.into(),
            status: CURRENT_STATUS.to_string(),
            title: title.into(),
            parent_id: parent_id.into(),
            body: PageBody::storage(content),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VersionUpdate {
    pub number: u64,
    pub message: String,
}

/// Body of `PUT /pages/{id}`. `version.number` must be one past the
/// version currently stored remotely.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UpdatePageRequest {
    pub id: String,
    pub title: String,
    pub status: String,
    pub body: PageBody,
    pub version: VersionUpdate,
}

impl UpdatePageRequest {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        version: u64,
        message: impl Into<String>,
    ) -> Self {
        UpdatePageRequest {
            id: id.into(),
            title: title.into(),
            status: CURRENT_STATUS.to_string(),
            body: PageBody::storage(content),
            version: VersionUpdate {
                number: version,
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_page() {
        let page: Page = serde_json::from_value(json!({
            "id": "123",
            "title": "Groceries",
            "status": "current",
            "spaceId": "42",
            "body": {"storage": {"value": "<p>milk</p>", "representation": "storage"}},
            "version": {"number": 4, "createdAt": "2024-01-01T00:00:00Z"}
        }))
        .unwrap();
        assert_eq!(page.id, "123");
        assert_eq!(page.space_id, "42");
        assert_eq!(page.body.storage.value, "<p>milk</p>");
        assert_eq!(page.version.number, 4);
    }

    #[test]
    fn listing_without_links_has_no_next() {
        let list: PageList =
            serde_json::from_value(json!({"results": [{"id": "1", "title": "A"}]})).unwrap();
        assert_eq!(list.results.len(), 1);
        assert_eq!(list.results[0].status, "");
        assert_eq!(list.next_endpoint(), None);

        let list: PageList =
            serde_json::from_value(json!({"results": [], "_links": {"next": ""}})).unwrap();
        assert_eq!(list.next_endpoint(), None);
    }

    #[test]
    fn next_link_is_used_verbatim() {
        let list: PageList = serde_json::from_value(json!({
            "results": [],
            "_links": {"next": "/pages?space-id=42&cursor=abc"}
        }))
        .unwrap();
        assert_eq!(list.next_endpoint(), Some("/pages?space-id=42&cursor=abc"));
    }

    #[test]
    fn create_request_wire_shape() {
        let req = CreatePageRequest::new("42", "7", "Title", "<p>hi</p>");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "spaceId": "42",
                "status": "current",
                "title": "Title",
                "parentId": "7",
                "body": {"storage": {"value": "<p>hi</p>", "representation": "storage"}}
            })
        );
    }

    #[test]
    fn update_request_wire_shape() {
        let req = UpdatePageRequest::new("9", "T", "C", 3, "Updated via Notes App");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "id": "9",
                "title": "T",
                "status": "current",
                "body": {"storage": {"value": "C", "representation": "storage"}},
                "version": {"number": 3, "message": "Updated via Notes App"}
            })
        );
    }
}
