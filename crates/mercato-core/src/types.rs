//! # Domain Types
//!
//! The four business entities the list engine synchronizes.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │    Supplier     │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  name           │   │  name           │       │
//! │  │  phone?/email?  │   │  tax_id?        │   │  price_cents    │       │
//! │  └─────────────────┘   └─────────────────┘   │  stock          │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │      Sale       │   │    SaleItem     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  id (UUID)      │   │  product_name   │                             │
//! │  │  sold_at        │   │  quantity       │                             │
//! │  │  total_cents    │   │  unit_price     │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Money Rule
//! All monetary values are integer cents (i64). Floats never touch money.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Customer
// =============================================================================

/// A customer record as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Entity ID (UUID, assigned by the backend)
    pub id: String,

    /// Customer name. The backend sorts and filters on this field.
    pub name: String,

    /// Optional phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Optional email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// =============================================================================
// Supplier
// =============================================================================

/// A supplier record as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    /// Entity ID (UUID, assigned by the backend)
    pub id: String,

    /// Supplier name. The backend sorts and filters on this field.
    pub name: String,

    /// Optional company tax identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,

    /// Optional phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Optional email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// =============================================================================
// Product
// =============================================================================

/// An inventory item as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Entity ID (UUID, assigned by the backend)
    pub id: String,

    /// Product name. The backend sorts and filters on this field.
    pub name: String,

    /// Unit price in integer cents
    pub price_cents: i64,

    /// Units currently in stock
    pub stock: i64,

    /// Supplier this product is bought from, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
}

impl Product {
    /// Returns true if the product can be added to a sale.
    ///
    /// The sale-composition picker only offers products with stock on hand.
    pub fn is_sellable(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One line of a completed sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    /// Product name at time of sale (frozen; the product may change later)
    pub product_name: String,

    /// Units sold
    pub quantity: i64,

    /// Unit price in cents at time of sale (frozen)
    pub unit_price_cents: i64,
}

impl SaleItem {
    /// Line total (unit price × quantity), in cents.
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }
}

/// A completed sale as served by the backend.
///
/// Sales are listed newest-first and are never text-filtered; the sales
/// screen has no search box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Entity ID (UUID, assigned by the backend)
    pub id: String,

    /// Customer the sale was made to, when recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,

    /// When the sale was completed
    pub sold_at: DateTime<Utc>,

    /// Sale total in integer cents
    pub total_cents: i64,

    /// Line items
    #[serde(default)]
    pub items: Vec<SaleItem>,
}

// =============================================================================
// Unit Tests
// =============================================================================
