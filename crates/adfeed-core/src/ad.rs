//! Domain entities.

use std::hash::{Hash, Hasher};

use serde::Serialize;

/// A classified ad as shown in the feed and on the detail screen.
///
/// Equality and hashing only look at the id.
#[derive(Debug, Clone, Serialize)]
pub struct Ad {
    /// Opaque server id.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Picture URL at thumbnail size, if any picture resolved.
    pub picture_thumb: Option<String>,
    /// Picture URL at large size, if any picture resolved.
    pub picture_large: Option<String>,
    /// Estimated travel time in minutes. Display only.
    pub time: u32,
    /// Estimated distance in kilometres. Display only.
    pub distance: f64,
}

impl PartialEq for Ad {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Ad {}

impl Hash for Ad {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Cursor returned with every page.
///
/// Tokens are opaque: they are never parsed, only echoed back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Token for the next page, absent on the last one.
    pub after: Option<String>,
    /// Token for the previous page.
    pub before: Option<String>,
    /// Number of ads the server actually returned.
    pub page_length: u32,
}

impl Pagination {
    /// Returns true when a forward page can be requested.
    pub fn has_next(&self) -> bool {
        self.after.is_some()
    }
}

/// One page of ads, in server order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdResponse {
    pub data: Vec<Ad>,
    pub paging: Pagination,
}

/// Synthetic travel attributes attached to an ad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelEstimate {
    pub minutes: u32,
    pub distance_km: f64,
}
