//! Absolute hypermedia links derived from the incoming request.
//!
//! Links use the scheme and host the client addressed, as reported by
//! Actix's connection info (which honours `Forwarded` and `X-Forwarded-*`).

use actix_web::HttpRequest;
use pagination::{Link, PageLinks, PageMetadata};
use serde::Serialize;
use url::Url;
use utoipa::ToSchema;

use crate::domain::Error;

/// `_links` object of a single resource.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResourceLinks {
    #[serde(rename = "self")]
    #[schema(value_type = LinkSchema)]
    pub self_link: Link,
}

/// Hypertext reference.
#[derive(Serialize, ToSchema)]
#[schema(as = Link)]
pub struct LinkSchema {
    href: String,
}

/// Navigation links of a page envelope.
#[derive(Serialize, ToSchema)]
#[schema(as = PageLinks)]
pub struct PageLinksSchema {
    first: Option<LinkSchema>,
    prev: Option<LinkSchema>,
    #[serde(rename = "self")]
    current: LinkSchema,
    next: Option<LinkSchema>,
    last: Option<LinkSchema>,
}

/// Page metadata of a page envelope.
#[derive(Serialize, ToSchema)]
#[schema(as = PageMetadata)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadataSchema {
    size: u32,
    total_elements: u64,
    total_pages: u64,
    number: u32,
}

/// URLs derived from one request.
#[derive(Debug, Clone)]
pub struct RequestUrls {
    origin: Url,
    current: Url,
}

impl RequestUrls {
    /// Capture the origin and full URL of `req`.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` when the host cannot form a URL.
    pub fn from_request(req: &HttpRequest) -> Result<Self, Error> {
        let info = req.connection_info();
        let origin = Url::parse(&format!("{}://{}", info.scheme(), info.host()))
            .map_err(|err| Error::invalid_request(format!("invalid request host: {err}")))?;
        let mut current = origin.clone();
        current.set_path(req.path());
        let query = req.query_string();
        current.set_query((!query.is_empty()).then_some(query));
        Ok(Self { origin, current })
    }

    /// Link to `path` on the request's origin.
    pub fn resource(&self, path: &str) -> Link {
        let mut url = self.origin.clone();
        url.set_path(path);
        Link::from(url)
    }

    /// `_links` object for the resource at `path`.
    pub fn resource_links(&self, path: &str) -> ResourceLinks {
        ResourceLinks {
            self_link: self.resource(path),
        }
    }

    /// Navigation links for a page of results at the current URL.
    pub fn page_links(&self, metadata: &PageMetadata) -> PageLinks {
        PageLinks::for_page(&self.current, metadata)
    }
}
