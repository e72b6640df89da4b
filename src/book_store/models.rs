use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Client-generated primary key of a book.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub String);

impl BookId {
    /// Generates a fresh random id. Used for uniqueness only.
    pub fn generate() -> Self {
        BookId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        BookId(s.to_string())
    }
}

/// Delivery progress of a pre-ordered book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryStatus {
    #[default]
    No,
    Shipped,
    Yes,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::No => "No",
            DeliveryStatus::Shipped => "Shipped",
            DeliveryStatus::Yes => "Yes",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "No" => Some(DeliveryStatus::No),
            "Shipped" => Some(DeliveryStatus::Shipped),
            "Yes" => Some(DeliveryStatus::Yes),
            _ => None,
        }
    }
}

impl FromStr for DeliveryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "no" => Ok(DeliveryStatus::No),
            "shipped" => Ok(DeliveryStatus::Shipped),
            "yes" => Ok(DeliveryStatus::Yes),
            _ => Err(format!(
                "invalid delivery status '{}', expected one of: No, Shipped, Yes",
                s
            )),
        }
    }
}

/// Whether the owner intends to sell the book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForSaleStatus {
    #[default]
    No,
    Maybe,
    Yes,
}

impl ForSaleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForSaleStatus::No => "No",
            ForSaleStatus::Maybe => "Maybe",
            ForSaleStatus::Yes => "Yes",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "No" => Some(ForSaleStatus::No),
            "Maybe" => Some(ForSaleStatus::Maybe),
            "Yes" => Some(ForSaleStatus::Yes),
            _ => None,
        }
    }
}

impl FromStr for ForSaleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "no" => Ok(ForSaleStatus::No),
            "maybe" => Ok(ForSaleStatus::Maybe),
            "yes" => Ok(ForSaleStatus::Yes),
            _ => Err(format!(
                "invalid for-sale status '{}', expected one of: No, Maybe, Yes",
                s
            )),
        }
    }
}

/// Everything about a book except its id. This is also the creation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetails {
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub publisher: String,
    pub pre_order_start_date: String,
    pub estimated_delivery_date: String,
    #[serde(default)]
    pub ordered: bool,
    #[serde(default)]
    pub delivered: DeliveryStatus,
    #[serde(default)]
    pub for_sale: ForSaleStatus,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub sold_for: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_quantity() -> u32 {
    1
}

impl Default for BookDetails {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            publisher: String::new(),
            pre_order_start_date: String::new(),
            estimated_delivery_date: String::new(),
            ordered: false,
            delivered: DeliveryStatus::No,
            for_sale: ForSaleStatus::No,
            total_price: 0.0,
            quantity: 1,
            sold_for: None,
            tags: vec![],
        }
    }
}

/// A persisted book record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    #[serde(flatten)]
    pub details: BookDetails,
}

impl Book {
    pub fn new(id: BookId, details: BookDetails) -> Self {
        Self { id, details }
    }

    pub fn title(&self) -> &str {
        &self.details.title
    }
}

/// What a submitted form asks the collection to do.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveRequest {
    /// A book that has never been stored; the collection assigns its id.
    New(BookDetails),
    /// A full replacement of an already stored book.
    Existing(Book),
}
