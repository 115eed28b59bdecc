//! The record model shared across the Mapscout crates.
//!
//! A [`LocationRecord`] is the structured field set extracted for one map
//! listing. Every field is optional: listing pages are heterogeneous and a
//! missing field is a normal outcome, not an error. The record shape is
//! fixed — all keys are present in serialized output even when every
//! extraction failed.

use serde::{Deserialize, Serialize};

/// One extracted business listing.
///
/// Created fresh per entry with [`LocationRecord::default`], populated field
/// by field, and never mutated once the pipeline moves to the next entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationRecord {
    /// Business category label
    pub category: Option<String>,
    /// Listing name
    pub name: Option<String>,
    /// Phone number as displayed
    pub phone: Option<String>,
    /// URL of the listing's detail page at extraction time
    pub maps_url: Option<String>,
    /// Business website URL
    pub website: Option<String>,
    /// Comma-joined email addresses discovered on the business website
    pub email: Option<String>,
    /// Operational status (e.g. "Open", "Permanently closed")
    pub business_status: Option<String>,
    /// Street address as displayed
    pub address: Option<String>,
    /// Review count as displayed
    pub total_reviews: Option<String>,
    /// Booking link URLs (declared in the record shape, currently never
    /// populated by any extraction rule)
    pub booking_links: Option<String>,
    /// Star rating as displayed
    pub rating: Option<String>,
    /// Opening hours text
    pub hours: Option<String>,
}

impl LocationRecord {
    /// Number of fields in the record shape.
    pub const FIELD_COUNT: usize = 12;

    /// Returns true when no field was populated.
    ///
    /// An all-absent record is still a valid emission: it means every
    /// extraction rule missed, not that the entry failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.name.is_none()
            && self.phone.is_none()
            && self.maps_url.is_none()
            && self.website.is_none()
            && self.email.is_none()
            && self.business_status.is_none()
            && self.address.is_none()
            && self.total_reviews.is_none()
            && self.booking_links.is_none()
            && self.rating.is_none()
            && self.hours.is_none()
    }
}

/// What a pipeline run hands back to its caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeOutcome {
    /// Number of records extracted
    pub total_results: usize,
    /// False when harvesting hit its stall or iteration bound before the
    /// end-of-results marker appeared; the record list may be partial
    pub harvest_complete: bool,
    /// The extracted records, in harvest order
    pub locations: Vec<LocationRecord>,
}

impl ScrapeOutcome {
    /// Build an outcome from the extracted records.
    #[must_use]
    pub fn new(locations: Vec<LocationRecord>, harvest_complete: bool) -> Self {
        Self {
            total_results: locations.len(),
            harvest_complete,
            locations,
        }
    }
}
