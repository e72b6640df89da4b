use super::numeric::{parse_quantity, parse_sold_for, parse_total_price};
use super::tags::TagEditor;
use crate::book_store::{Book, BookDetails, BookId, DeliveryStatus, ForSaleStatus, SaveRequest};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be a date in YYYY-MM-DD format, got '{value}'")]
    InvalidDate { field: &'static str, value: String },
}

/// Raw form state, as typed by the user.
///
/// Numeric fields stay text until [`BookForm::submit`] coerces them, so a
/// half-typed value never has to be representable as a number.
#[derive(Debug, Clone, PartialEq)]
pub struct BookForm {
    existing_id: Option<BookId>,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub pre_order_start_date: String,
    pub estimated_delivery_date: String,
    pub ordered: bool,
    pub delivered: DeliveryStatus,
    pub for_sale: ForSaleStatus,
    pub total_price: String,
    pub quantity: String,
    pub sold_for: String,
    pub tags: TagEditor,
}

impl BookForm {
    /// A blank form for a new book, with every default populated.
    pub fn empty() -> Self {
        Self {
            existing_id: None,
            title: String::new(),
            author: String::new(),
            publisher: String::new(),
            pre_order_start_date: String::new(),
            estimated_delivery_date: String::new(),
            ordered: false,
            delivered: DeliveryStatus::No,
            for_sale: ForSaleStatus::No,
            total_price: "0".to_string(),
            quantity: "1".to_string(),
            sold_for: String::new(),
            tags: TagEditor::new(),
        }
    }

    /// A form editing `book`. Submitting it keeps the book's id.
    pub fn from_book(book: &Book) -> Self {
        let details = &book.details;
        Self {
            existing_id: Some(book.id.clone()),
            title: details.title.clone(),
            author: details.author.clone(),
            publisher: details.publisher.clone(),
            pre_order_start_date: details.pre_order_start_date.clone(),
            estimated_delivery_date: details.estimated_delivery_date.clone(),
            ordered: details.ordered,
            delivered: details.delivered,
            for_sale: details.for_sale,
            total_price: details.total_price.to_string(),
            quantity: details.quantity.to_string(),
            sold_for: details.sold_for.map(|v| v.to_string()).unwrap_or_default(),
            tags: TagEditor::with_tags(&details.tags),
        }
    }

    pub fn existing_id(&self) -> Option<&BookId> {
        self.existing_id.as_ref()
    }

    pub fn is_edit(&self) -> bool {
        self.existing_id.is_some()
    }

    /// Validates and normalizes the form into a save request.
    pub fn submit(&self) -> Result<SaveRequest, FormError> {
        let title = required("title", &self.title)?;
        let publisher = required("publisher", &self.publisher)?;
        let pre_order_start_date = iso_date("pre-order start date", &self.pre_order_start_date)?;
        let estimated_delivery_date =
            iso_date("estimated delivery date", &self.estimated_delivery_date)?;

        let details = BookDetails {
            title,
            author: self.author.trim().to_string(),
            publisher,
            pre_order_start_date,
            estimated_delivery_date,
            ordered: self.ordered,
            delivered: self.delivered,
            for_sale: self.for_sale,
            total_price: parse_total_price(&self.total_price),
            quantity: parse_quantity(&self.quantity),
            sold_for: parse_sold_for(&self.sold_for),
            tags: self.tags.tags().to_vec(),
        };

        Ok(match &self.existing_id {
            Some(id) => SaveRequest::Existing(Book::new(id.clone(), details)),
            None => SaveRequest::New(details),
        })
    }
}

impl Default for BookForm {
    fn default() -> Self {
        Self::empty()
    }
}

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn iso_date(field: &'static str, value: &str) -> Result<String, FormError> {
    let trimmed = required(field, value)?;
    NaiveDate::parse_from_str(&trimmed, "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|_| FormError::InvalidDate {
            field,
            value: trimmed,
        })
}
