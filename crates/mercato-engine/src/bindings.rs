//! # Entity Bindings
//!
//! Wires the HTTP sources to list engines, write facades and pickers with
//! each entity's fixed parameters (sort field, search behavior, picker
//! eligibility). One `Mercato` per authenticated session; screens take the
//! binding they render.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Entity Bindings                                │
//! │                                                                         │
//! │  Entity     Sort           Search    Picker                             │
//! │  ─────────  ─────────────  ────────  ──────────────────────────────     │
//! │  customers  name,asc       yes       fetch-all, name filter             │
//! │  suppliers  name,asc       yes       fetch-all, name filter             │
//! │  products   name,asc       yes       fetch-all, name filter, stock>0    │
//! │  sales      soldAt,desc    NO        (none)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use mercato_client::{
    ApiClient, CustomerSource, ProductSource, SaleSource, SupplierSource,
};
use mercato_core::Product;

use crate::config::EngineConfig;
use crate::diag::DiagnosticsSink;
use crate::picker::PickerList;
use crate::resync::MutationResync;
use crate::store::ListEngine;

/// Write facade + owning list for one entity, served by the same source.
pub type CustomerBinding = MutationResync<CustomerSource, CustomerSource>;
pub type SupplierBinding = MutationResync<SupplierSource, SupplierSource>;
pub type ProductBinding = MutationResync<ProductSource, ProductSource>;
pub type SaleBinding = MutationResync<SaleSource, SaleSource>;

/// Session-scoped factory for entity bindings.
///
/// Bindings are constructed per screen mount, so each screen gets its own
/// list state, query and debounce timer.
pub struct Mercato {
    api: ApiClient,
    config: EngineConfig,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl Mercato {
    pub fn new(
        api: ApiClient,
        config: EngineConfig,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        Mercato {
            api,
            config,
            diagnostics,
        }
    }

    /// Customer list + writes, searchable, sorted by name.
    pub fn customers(&self) -> CustomerBinding {
        let source = CustomerSource::new(self.api.clone());
        let list = ListEngine::new(
            "customers",
            source.clone(),
            CustomerSource::default_sort(),
            &self.config,
            Arc::clone(&self.diagnostics),
        );
        MutationResync::new("customers", list, source, Arc::clone(&self.diagnostics))
    }

    /// Supplier list + writes, searchable, sorted by name.
    pub fn suppliers(&self) -> SupplierBinding {
        let source = SupplierSource::new(self.api.clone());
        let list = ListEngine::new(
            "suppliers",
            source.clone(),
            SupplierSource::default_sort(),
            &self.config,
            Arc::clone(&self.diagnostics),
        );
        MutationResync::new("suppliers", list, source, Arc::clone(&self.diagnostics))
    }

    /// Product list + writes, searchable, sorted by name.
    pub fn products(&self) -> ProductBinding {
        let source = ProductSource::new(self.api.clone());
        let list = ListEngine::new(
            "products",
            source.clone(),
            ProductSource::default_sort(),
            &self.config,
            Arc::clone(&self.diagnostics),
        );
        MutationResync::new("products", list, source, Arc::clone(&self.diagnostics))
    }

    /// Sales history + sale recording. Newest first, no search box.
    pub fn sales(&self) -> SaleBinding {
        let source = SaleSource::new(self.api.clone());
        let list = ListEngine::without_search(
            "sales",
            source.clone(),
            SaleSource::default_sort(),
            &self.config,
            Arc::clone(&self.diagnostics),
        );
        MutationResync::new("sales", list, source, Arc::clone(&self.diagnostics))
    }

    /// Customer picker for the sale form.
    pub fn customer_picker(&self) -> PickerList<CustomerSource> {
        PickerList::new(
            "customers",
            CustomerSource::new(self.api.clone()),
            Arc::clone(&self.diagnostics),
            |customer| &customer.name,
        )
    }

    /// Product picker for the sale form. Out-of-stock products are hidden.
    pub fn product_picker(&self) -> PickerList<ProductSource> {
        PickerList::with_eligibility(
            "products",
            ProductSource::new(self.api.clone()),
            Arc::clone(&self.diagnostics),
            |product| &product.name,
            Product::is_sellable,
        )
    }
}
