//! Start/limit pagination envelopes.

use serde::Deserialize;

/// One page of a start/limit paginated listing.
///
/// ```json
/// { "values": [...], "isLastPage": false, "nextPageStart": 25 }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartLimitPage<T> {
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    /// Whether this is the final page.
    #[serde(default)]
    pub is_last_page: bool,

    /// Where the next page starts, present when this is not the last page.
    #[serde(default)]
    pub next_page_start: Option<u64>,
}

impl<T> StartLimitPage<T> {
    /// The `start` of the following page, or `None` when the listing is done.
    ///
    /// A page that is not marked last but carries no `nextPageStart` ends the
    /// listing as well, since there is nowhere to continue from.
    pub fn next_start(&self) -> Option<u64> {
        if self.is_last_page {
            None
        } else {
            self.next_page_start
        }
    }
}

/// A `{ "value": [...] }` envelope as returned by Azure DevOps list calls.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueList<T> {
    /// The listed items.
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}
