//! Hyperlinks are derived from the route templates at response time and never
//! stored. Every function here is pure: `(resource, routes) -> links`.

use axum::http::{
    header::{HeaderMap, HeaderValue, HOST},
    Uri,
};

use crate::config::AppConfig;
use crate::models::{Activity, Page, Participant};
use crate::web::hal::{Link, Links};

pub const RELATION_SELF: &str = "self";
pub const RELATION_ACTIVITIES: &str = "activities";
pub const RELATION_ACTIVITY: &str = "activity";
pub const RELATION_PARTICIPANTS: &str = "participants";
pub const RELATION_FIRST: &str = "first";
pub const RELATION_PREV: &str = "prev";
pub const RELATION_NEXT: &str = "next";
pub const RELATION_LAST: &str = "last";

pub const API_ROOT: &str = "/api/v1";

/// The route table, anchored at an absolute base such as `http://localhost:3000`.
#[derive(Debug, Clone, PartialEq)]
pub struct Routes {
    base: String,
}

impl Routes {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Uses the configured public base, else the request's `Host` header.
    pub fn for_request(config: &AppConfig, headers: &HeaderMap) -> Self {
        if let Some(base) = &config.public_base_url {
            return Self::new(base.as_str());
        }
        let scheme = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| *s == "http" || *s == "https")
            .unwrap_or("http");
        match headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|h| !h.is_empty())
        {
            Some(host) => Self::new(format!("{}://{}", scheme, host)),
            None => Self::new("http://localhost"),
        }
    }

    pub fn root(&self) -> String {
        format!("{}{}", self.base, API_ROOT)
    }

    pub fn activities(&self) -> String {
        format!("{}/activities", self.root())
    }

    pub fn activities_page(&self, search: Option<&str>, page: u32, size: u32) -> String {
        let mut href = format!("{}?", self.activities());
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            href.push_str(&format!("search={}&", urlencoding::encode(search)));
        }
        href.push_str(&format!("page={}&size={}", page, size));
        href
    }

    pub fn activity(&self, alternate_key: &str) -> String {
        format!("{}/{}", self.activities(), urlencoding::encode(alternate_key))
    }

    pub fn participants(&self, alternate_key: &str) -> String {
        format!("{}/participants", self.activity(alternate_key))
    }

    pub fn participants_page(&self, alternate_key: &str, page: u32, size: u32) -> String {
        format!("{}?page={}&size={}", self.participants(alternate_key), page, size)
    }

    pub fn participant(&self, alternate_key: &str, participant_key: &str) -> String {
        format!(
            "{}/{}",
            self.participants(alternate_key),
            urlencoding::encode(participant_key)
        )
    }
}

pub fn root_links(routes: &Routes) -> Links {
    let mut links = Links::new();
    links.push(RELATION_ACTIVITIES, routes.activities());
    links
}

pub fn activity_links(activity: &Activity, routes: &Routes) -> Links {
    let mut links = Links::new();
    links.push(RELATION_SELF, routes.activity(&activity.alternate_key));
    links.push(RELATION_PARTICIPANTS, routes.participants(&activity.alternate_key));
    links.push(RELATION_ACTIVITIES, routes.activities());
    links
}

pub fn participant_links(participant: &Participant, routes: &Routes) -> Links {
    let mut links = Links::new();
    links.push(
        RELATION_SELF,
        routes.participant(&participant.activity_alternate_key, &participant.alternate_key),
    );
    links.push(RELATION_ACTIVITY, routes.activity(&participant.activity_alternate_key));
    links.push(RELATION_ACTIVITIES, routes.activities());
    links
}

/// Navigation links of a paged collection; `href` renders the URL of page `n`.
pub fn page_links<T>(page: &Page<T>, href: impl Fn(u32) -> String) -> Links {
    let navigable = page.has_previous() || page.has_next();
    let mut links = Links::new();
    if navigable {
        links.push(RELATION_FIRST, href(0));
    }
    if page.has_previous() {
        links.push(RELATION_PREV, href(page.number - 1));
    }
    links.push(RELATION_SELF, href(page.number));
    if page.has_next() {
        links.push(RELATION_NEXT, href(page.number + 1));
    }
    if navigable {
        links.push(RELATION_LAST, href(page.total_pages().saturating_sub(1)));
    }
    links
}

/// Turns a link into a `Location` header value. `None` when the href is not
/// an absolute URI.
pub fn to_location(link: &Link) -> Option<HeaderValue> {
    let uri: Uri = link.href.parse().ok()?;
    if uri.scheme().is_none() || uri.authority().is_none() {
        return None;
    }
    HeaderValue::from_str(&uri.to_string()).ok()
}
