//! Normalization of user-entered book data before it reaches the collection.

mod book_form;
mod numeric;
mod tags;

pub use book_form::{BookForm, FormError};
pub use numeric::{parse_quantity, parse_sold_for, parse_total_price};
pub use tags::{normalize_tags, TagEditor, TagKey};
