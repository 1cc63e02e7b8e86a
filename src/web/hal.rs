use axum::{
    http::header::{HeaderValue, CONTENT_TYPE},
    response::{IntoResponse, Response},
    Json,
};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::models::Page;

pub const HAL_JSON: &str = "application/hal+json";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    #[serde(skip)]
    pub rel: &'static str,
    pub href: String,
}

impl Link {
    pub fn new(rel: &'static str, href: impl Into<String>) -> Self {
        Self {
            rel,
            href: href.into(),
        }
    }
}

/// Ordered relation → link set, rendered as a HAL `_links` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Links(Vec<Link>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rel: &'static str, href: impl Into<String>) {
        self.0.push(Link::new(rel, href));
    }

    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.iter().find(|l| l.rel == rel)
    }

    pub fn rels(&self) -> Vec<&'static str> {
        self.0.iter().map(|l| l.rel).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for link in &self.0 {
            map.serialize_entry(link.rel, link)?;
        }
        map.end()
    }
}

/// A representation together with its navigation links.
#[derive(Debug, Clone, Serialize)]
pub struct Resource<T> {
    #[serde(flatten)]
    pub content: T,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T> Resource<T> {
    pub fn new(content: T, links: Links) -> Self {
        Self { content, links }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
}

#[derive(Debug, Clone)]
pub struct Embedded<T> {
    rel: &'static str,
    items: Vec<T>,
}

impl<T: Serialize> Serialize for Embedded<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.rel, &self.items)?;
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PagedResources<T> {
    #[serde(rename = "_embedded")]
    pub embedded: Embedded<Resource<T>>,
    #[serde(rename = "_links")]
    pub links: Links,
    pub page: PageMetadata,
}

impl<T> PagedResources<T> {
    pub fn new(rel: &'static str, page: Page<Resource<T>>, links: Links) -> Self {
        let metadata = PageMetadata {
            size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages(),
            number: page.number,
        };
        Self {
            embedded: Embedded {
                rel,
                items: page.content,
            },
            links,
            page: metadata,
        }
    }
}

/// JSON body served as `application/hal+json`.
pub struct Hal<T>(pub T);

impl<T: Serialize> IntoResponse for Hal<T> {
    fn into_response(self) -> Response {
        let mut response = Json(self.0).into_response();
        if response.status().is_success() {
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(HAL_JSON));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Thing {
        name: &'static str,
    }

    #[test]
    fn links_render_as_ordered_map() {
        let mut links = Links::new();
        links.push("self", "http://localhost/things/1");
        links.push("things", "http://localhost/things");
        let value = serde_json::to_value(Resource::new(Thing { name: "one" }, links)).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "one",
                "_links": {
                    "self": { "href": "http://localhost/things/1" },
                    "things": { "href": "http://localhost/things" }
                }
            })
        );
    }

    #[test]
    fn paged_resources_embed_under_relation() {
        let page = Page::new(vec![Resource::new(Thing { name: "one" }, Links::new())], 0, 5, 1);
        let value = serde_json::to_value(PagedResources::new("things", page, Links::new())).unwrap();
        assert_eq!(value["_embedded"]["things"][0]["name"], "one");
        assert_eq!(
            value["page"],
            json!({ "size": 5, "totalElements": 1, "totalPages": 1, "number": 0 })
        );
    }
}
