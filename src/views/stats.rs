use crate::book_store::{Book, DeliveryStatus};
use serde::Serialize;

/// Aggregate totals shown above the collection list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub total_books: usize,
    /// Sum of every book's total price.
    pub total_value: f64,
    /// Sum of every sale price; unsold books count as zero.
    pub total_sold: f64,
    pub ordered_count: usize,
    /// Books whose delivery status is `Yes`. Shipped books are not counted.
    pub delivered_count: usize,
}

impl CollectionStats {
    pub fn compute(books: &[Book]) -> Self {
        books.iter().fold(Self::default(), |mut stats, book| {
            let details = &book.details;
            stats.total_books += 1;
            stats.total_value += details.total_price;
            stats.total_sold += details.sold_for.unwrap_or(0.0);
            if details.ordered {
                stats.ordered_count += 1;
            }
            if details.delivered == DeliveryStatus::Yes {
                stats.delivered_count += 1;
            }
            stats
        })
    }
}
