//! Messages and reviews

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::listing::{Predicate, contains_ignore_case};

/// Highest review rating.
pub const MAX_RATING: u8 = 5;

/// Errors when validating a review.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReviewError {
    /// Rating outside `1..=5`.
    #[error("rating {0} is not between 1 and 5")]
    RatingOutOfRange(u8),
}

/// Review rating between one and five stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Returns the number of stars.
    pub fn stars(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(MAX_RATING)
    }
}

impl TryFrom<u8> for Rating {
    type Error = ReviewError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=MAX_RATING).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ReviewError::RatingOutOfRange(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Message sent through the contact form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContactMessage {
    /// Primary key
    pub id: u64,

    /// Sender name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Sender e-mail
    #[serde(rename = "correo")]
    pub email: String,

    /// Subject line
    #[serde(rename = "asunto")]
    pub subject: String,

    /// Body
    #[serde(rename = "mensaje")]
    pub message: String,

    /// When the message was received
    #[serde(rename = "fecha_envio", default)]
    pub sent_at: Option<Timestamp>,

    /// Whether an admin has read it
    #[serde(rename = "leido", default)]
    pub read: bool,
}

/// Body for sending a contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewContactMessage {
    /// Sender name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Sender e-mail
    #[serde(rename = "correo")]
    pub email: String,

    /// Subject line
    #[serde(rename = "asunto")]
    pub subject: String,

    /// Body
    #[serde(rename = "mensaje")]
    pub message: String,
}

/// Customer review.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Review {
    /// Primary key
    pub id: u64,

    /// Reviewer name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Review text
    #[serde(rename = "comentario")]
    pub comment: String,

    /// Star rating
    #[serde(rename = "calificacion", default)]
    pub rating: Rating,

    /// When the review was posted
    #[serde(rename = "fecha", default)]
    pub created_at: Option<Timestamp>,
}

/// Body for posting a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReview {
    /// Reviewer name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Review text
    #[serde(rename = "comentario")]
    pub comment: String,

    /// Star rating
    #[serde(rename = "calificacion")]
    pub rating: Rating,
}

/// Average rating over `reviews`, `None` when there are none.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }

    let sum: u32 = reviews
        .iter()
        .map(|review| u32::from(review.rating.stars()))
        .sum();

    #[expect(clippy::cast_precision_loss, reason = "review counts are small")]
    let count = reviews.len() as f64;

    Some(f64::from(sum) / count)
}

/// Filters for the contact message inbox.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFilter {
    /// Case-insensitive search over name, e-mail and subject
    pub search: String,

    /// Only read (`Some(true)`) or unread (`Some(false)`) messages
    pub read: Option<bool>,
}

impl MessageFilter {
    /// Number of filters that narrow the listing.
    pub fn active_count(&self) -> usize {
        usize::from(!self.search.trim().is_empty()) + usize::from(self.read.is_some())
    }
}

impl Predicate<ContactMessage> for MessageFilter {
    fn matches(&self, message: &ContactMessage) -> bool {
        let search = self.search.trim();

        (contains_ignore_case(&message.name, search)
            || contains_ignore_case(&message.email, search)
            || contains_ignore_case(&message.subject, search))
            && self.read.is_none_or(|read| message.read == read)
    }
}
