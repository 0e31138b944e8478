//! Navigation links for paged responses.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::PageMetadata;

const PAGE_PARAM: &str = "page";
const SIZE_PARAM: &str = "size";

/// Hypertext reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute target URL.
    pub href: String,
}

impl Link {
    /// Link to `url`.
    #[must_use]
    pub fn new(url: &Url) -> Self {
        Self {
            href: url.as_str().to_owned(),
        }
    }
}

impl From<Url> for Link {
    fn from(url: Url) -> Self {
        Self {
            href: String::from(url),
        }
    }
}

/// First/prev/self/next/last links for one page.
///
/// `self` always echoes the request URL. The other links rewrite only the
/// `page` and `size` parameters so filters and sort criteria survive
/// navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    /// First page, present whenever at least one page exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<Link>,
    /// Preceding page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<Link>,
    /// The requested page.
    #[serde(rename = "self")]
    pub current: Link,
    /// Following page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Link>,
    /// Last page, present whenever at least one page exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<Link>,
}

impl PageLinks {
    /// Derive navigation links from the URL that requested `metadata`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::{Page, PageLinks, PageRequest};
    /// use url::Url;
    ///
    /// let url = Url::parse("http://localhost/models?number=3&page=1&size=2").expect("url");
    /// let page: Page<u8> = Page::new(vec![1, 2], PageRequest::new(1, 2), 5);
    /// let links = PageLinks::for_page(&url, &page.metadata());
    ///
    /// assert_eq!(links.current.href, url.as_str());
    /// assert_eq!(
    ///     links.next.map(|link| link.href),
    ///     Some("http://localhost/models?number=3&page=2&size=2".to_owned())
    /// );
    /// ```
    #[must_use]
    pub fn for_page(request_url: &Url, metadata: &PageMetadata) -> Self {
        let number = u64::from(metadata.number);
        let last_index = metadata.total_pages.checked_sub(1);
        let link_to = |page: u64| Link::from(with_page(request_url, page, metadata.size));

        Self {
            first: last_index.map(|_| link_to(0)),
            prev: number.checked_sub(1).map(&link_to),
            current: Link::new(request_url),
            next: last_index
                .filter(|last| number < *last)
                .map(|_| link_to(number + 1)),
            last: last_index.map(&link_to),
        }
    }
}

fn with_page(url: &Url, page: u64, size: u32) -> Url {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM && key != SIZE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut target = url.clone();
    target
        .query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(PAGE_PARAM, &page.to_string())
        .append_pair(SIZE_PARAM, &size.to_string());
    target
}
