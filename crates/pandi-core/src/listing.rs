// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Client-side narrowing of directory, request and offering lists, plus the
// review helpers used on business pages.

use crate::error::{PandiError, Result};
use crate::types::{Business, ProviderOffering, RecordId, Review, ServiceRequest};

/// Select value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All Categories";
/// Select value meaning "no location filter".
pub const ALL_LOCATIONS: &str = "All Locations";

/// Categories offered by the request and offering forms.
pub const CATEGORIES: [&str; 7] = [
    "Home Services",
    "Professional Services",
    "Education & Training",
    "Events & Entertainment",
    "Health & Wellness",
    "Technology",
    "Others",
];

/// Anything that can be searched from a listing page.
pub trait Listing {
    /// Name or title.
    fn heading(&self) -> &str;
    fn description(&self) -> &str;
    fn category(&self) -> &str;
    /// Location or service area.
    fn area(&self) -> &str;
}

impl Listing for Business {
    fn heading(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn area(&self) -> &str {
        &self.location
    }
}

impl Listing for ServiceRequest {
    fn heading(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn area(&self) -> &str {
        &self.location
    }
}

impl Listing for ProviderOffering {
    fn heading(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn area(&self) -> &str {
        &self.service_area
    }
}

/// Search box + category/location selects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    pub text: String,
    pub category: Option<String>,
    pub area: Option<String>,
}

impl ListingQuery {
    pub fn matches<T: Listing>(&self, item: &T) -> bool {
        let needle = self.text.trim().to_lowercase();
        let text_match = needle.is_empty()
            || [item.heading(), item.description(), item.category()]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));

        text_match
            && selected(self.category.as_deref(), ALL_CATEGORIES)
                .is_none_or(|c| c == item.category())
            && selected(self.area.as_deref(), ALL_LOCATIONS).is_none_or(|a| a == item.area())
    }

    /// Items that match, in their original order.
    pub fn apply<'a, T: Listing>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }

    /// Category to send as a server-side filter, if one is selected.
    pub fn category_filter(&self) -> Option<String> {
        selected(self.category.as_deref(), ALL_CATEGORIES).map(str::to_owned)
    }
}

/// A select value, unless it is blank or the "all" sentinel.
fn selected<'a>(value: Option<&'a str>, all: &str) -> Option<&'a str> {
    value.filter(|v| !v.is_empty() && *v != all)
}

/// "Showing N of M" caption.
pub fn showing_caption(shown: usize, total: usize, noun: &str) -> String {
    format!("Showing {shown} of {total} {noun}")
}

// -- Reviews -----------------------------------------------------------------

/// The signed-in user's existing review, if they wrote one.
pub fn own_review<'a>(reviews: &'a [Review], user: &RecordId) -> Option<&'a Review> {
    reviews.iter().find(|r| r.user.is(user))
}

/// Mean star rating, or `None` without reviews.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    Some(f64::from(total) / reviews.len() as f64)
}

/// A rating must be picked (1–5 stars) before a review is submitted.
pub fn validate_rating(rating: u8) -> Result<u8> {
    match rating {
        1..=5 => Ok(rating),
        0 => Err(PandiError::Validation("Please select a star rating".into())),
        _ => Err(PandiError::Validation(format!(
            "rating must be between 1 and 5, got {rating}"
        ))),
    }
}
