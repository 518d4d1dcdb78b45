//! Magazine issue metadata, as served by the listing API.
//!
//! The hosting page fetches issue records and binds them to issue cards;
//! the viewer itself only consumes the ordered page-image list and the
//! optional downloadable PDF reference.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Publication season of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    /// Winter issue
    Winter,
    /// Spring issue
    Spring,
    /// Summer issue
    Summer,
    /// Fall issue
    Fall,
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
        };
        write!(f, "{name}")
    }
}

/// One published magazine issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Record identifier
    pub id: u64,
    /// Issue title
    pub title: String,
    /// Publication date (`YYYY-MM-DD` on the wire)
    pub publish_date: NaiveDate,
    /// Editorial description
    pub description: String,
    /// Absolute URL of the cover image
    pub cover_image: String,
    /// Human-readable issue number
    pub issue_number: String,
    /// Publication year
    pub year: i32,
    /// Publication season
    pub season: Season,
    /// Absolute URL of the full-issue PDF; empty when not yet uploaded
    pub pdf_file: String,
    /// Whether the issue is visible to readers
    pub is_published: bool,
    /// Ordered page-image URLs for the flip-book reader
    pub page_images: Vec<String>,
}

impl Issue {
    /// Publication date formatted as "Month Year", e.g. "May 2025"
    #[must_use]
    pub fn display_date(&self) -> String {
        self.publish_date.format("%B %Y").to_string()
    }

    /// Downloadable PDF reference, if one was uploaded
    #[must_use]
    pub fn download_url(&self) -> Option<String> {
        if self.pdf_file.is_empty() {
            None
        } else {
            Some(self.pdf_file.clone())
        }
    }
}
