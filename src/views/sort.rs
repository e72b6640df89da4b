use crate::book_store::{Book, DeliveryStatus, ForSaleStatus};
use std::fmt;
use std::str::FromStr;

/// Ordering applied to the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Collection order, untouched.
    #[default]
    Default,
    Ordered,
    Delivered,
    ForSale,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Default => "default",
            SortMode::Ordered => "ordered",
            SortMode::Delivered => "delivered",
            SortMode::ForSale => "for-sale",
        }
    }

    fn rank(&self, book: &Book) -> u8 {
        let details = &book.details;
        match self {
            SortMode::Default => 0,
            SortMode::Ordered => u8::from(details.ordered),
            SortMode::Delivered => match details.delivered {
                DeliveryStatus::Yes => 2,
                DeliveryStatus::Shipped => 1,
                DeliveryStatus::No => 0,
            },
            SortMode::ForSale => match details.for_sale {
                ForSaleStatus::Yes => 2,
                ForSaleStatus::Maybe => 1,
                ForSaleStatus::No => 0,
            },
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" | "" => Ok(SortMode::Default),
            "ordered" => Ok(SortMode::Ordered),
            "delivered" => Ok(SortMode::Delivered),
            "for-sale" | "forsale" | "for_sale" => Ok(SortMode::ForSale),
            _ => Err(format!(
                "invalid sort mode '{}', expected one of: default, ordered, delivered, for-sale",
                s
            )),
        }
    }
}

/// Returns the books ordered by descending rank for `mode`.
///
/// The sort is stable, so books of equal rank keep their collection order.
pub fn sort_books(books: &[Book], mode: SortMode) -> Vec<Book> {
    let mut sorted = books.to_vec();
    if mode != SortMode::Default {
        sorted.sort_by_key(|book| std::cmp::Reverse(mode.rank(book)));
    }
    sorted
}
