//! End-to-end engine flow for recording a sale: open the product picker,
//! filter locally, create the sale through the write facade and watch the
//! sales list resync, all against an in-memory backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use mercato_client::{EntityWriter, RemoteListSource};
use mercato_core::{
    FetchResult, PageRequest, PageResponse, Product, Sale, SaleItem, Sort,
};
use mercato_engine::{
    init_tracing, EngineConfig, ListEngine, MutationResync, NoOpSink, PickerList,
};

// =============================================================================
// In-memory backend
// =============================================================================

#[derive(Default)]
struct Backend {
    products: Vec<Product>,
    sales: Vec<Sale>,
}

#[derive(Clone, Default)]
struct ProductEndpoint(Arc<Mutex<Backend>>);

#[async_trait]
impl RemoteListSource for ProductEndpoint {
    type Item = Product;

    async fn fetch_page(&self, request: &PageRequest) -> FetchResult<PageResponse<Product>> {
        let backend = self.0.lock().unwrap();
        Ok(page_of(&backend.products, request))
    }

    async fn fetch_all(&self) -> FetchResult<Vec<Product>> {
        Ok(self.0.lock().unwrap().products.clone())
    }
}

#[derive(Clone, Default)]
struct SaleEndpoint(Arc<Mutex<Backend>>);

#[async_trait]
impl RemoteListSource for SaleEndpoint {
    type Item = Sale;

    async fn fetch_page(&self, request: &PageRequest) -> FetchResult<PageResponse<Sale>> {
        let backend = self.0.lock().unwrap();
        // Newest first, as the backend serves them.
        let mut rows = backend.sales.clone();
        rows.sort_by(|a, b| b.sold_at.cmp(&a.sold_at));
        Ok(page_of(&rows, request))
    }

    async fn fetch_all(&self) -> FetchResult<Vec<Sale>> {
        Ok(self.0.lock().unwrap().sales.clone())
    }
}

#[async_trait]
impl EntityWriter for SaleEndpoint {
    type Draft = Sale;

    async fn create(&self, draft: &Sale) -> FetchResult<()> {
        let mut backend = self.0.lock().unwrap();
        backend.sales.push(draft.clone());
        // Selling decrements stock, like the real backend.
        for item in &draft.items {
            if let Some(product) = backend
                .products
                .iter_mut()
                .find(|p| p.name == item.product_name)
            {
                product.stock -= item.quantity;
            }
        }
        Ok(())
    }

    async fn update(&self, _id: &str, _draft: &Sale) -> FetchResult<()> {
        Ok(())
    }

    async fn remove(&self, id: &str) -> FetchResult<()> {
        self.0.lock().unwrap().sales.retain(|sale| sale.id != id);
        Ok(())
    }
}

fn page_of<T: Clone>(rows: &[T], request: &PageRequest) -> PageResponse<T> {
    let from = (request.page_index * request.page_size) as usize;
    let to = (from + request.page_size as usize).min(rows.len());
    let content = if from < rows.len() {
        rows[from..to].to_vec()
    } else {
        Vec::new()
    };
    PageResponse {
        content,
        page_index: request.page_index,
        is_last_page: to >= rows.len(),
    }
}

fn product(id: &str, name: &str, price_cents: i64, stock: i64) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        price_cents,
        stock,
        supplier_id: None,
    }
}

fn seeded_backend() -> Arc<Mutex<Backend>> {
    Arc::new(Mutex::new(Backend {
        products: vec![
            product("p-1", "Cafe 500g", 1899, 4),
            product("p-2", "Acucar 1kg", 650, 0),
            product("p-3", "Caderno", 1200, 10),
        ],
        sales: Vec::new(),
    }))
}

// =============================================================================
// Flow
// =============================================================================

#[tokio::test]
async fn test_record_sale_flow() {
    init_tracing();

    let backend = seeded_backend();
    let config = EngineConfig::default();
    let diagnostics = Arc::new(NoOpSink);

    let sales_list = ListEngine::without_search(
        "sales",
        SaleEndpoint(Arc::clone(&backend)),
        Sort::desc("soldAt"),
        &config,
        diagnostics.clone(),
    );
    let sales = MutationResync::new(
        "sales",
        sales_list,
        SaleEndpoint(Arc::clone(&backend)),
        diagnostics.clone(),
    );
    let picker = PickerList::with_eligibility(
        "products",
        ProductEndpoint(Arc::clone(&backend)),
        diagnostics.clone(),
        |p| &p.name,
        Product::is_sellable,
    );

    // Sales screen mounts empty.
    sales.list().refresh().await;
    assert!(sales.list().snapshot().await.items.is_empty());

    // Picker opens with only sellable products, then narrows locally.
    picker.open().await;
    assert_eq!(picker.snapshot().await.visible.len(), 2);
    picker.set_filter("cafe").await;
    let visible = picker.snapshot().await.visible;
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Cafe 500g");

    // Recording the sale resyncs the list from page 0.
    let sale = Sale {
        id: "s-1".into(),
        customer_name: Some("Ana Souza".into()),
        sold_at: Utc.with_ymd_and_hms(2025, 3, 10, 14, 30, 0).unwrap(),
        total_cents: 3 * 1899,
        items: vec![SaleItem {
            product_name: "Cafe 500g".into(),
            quantity: 3,
            unit_price_cents: 1899,
        }],
    };
    sales.create(&sale).await.unwrap();

    let snapshot = sales.list().snapshot().await;
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].total_cents, 5697);
    assert!(!snapshot.has_more);

    // Reopening the picker reflects the decremented stock.
    picker.open().await;
    let cafe = picker
        .snapshot()
        .await
        .visible
        .into_iter()
        .find(|p| p.id == "p-1")
        .unwrap();
    assert_eq!(cafe.stock, 1);
}

#[tokio::test]
async fn test_sales_history_pages_newest_first() {
    let backend = seeded_backend();
    {
        let mut guard = backend.lock().unwrap();
        for day in 1..=25 {
            guard.sales.push(Sale {
                id: format!("s-{day}"),
                customer_name: None,
                sold_at: Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap(),
                total_cents: 100 * i64::from(day),
                items: Vec::new(),
            });
        }
    }

    let list = ListEngine::without_search(
        "sales",
        SaleEndpoint(backend),
        Sort::desc("soldAt"),
        &EngineConfig::default(),
        Arc::new(NoOpSink),
    );

    list.refresh().await;
    let snapshot = list.snapshot().await;
    assert_eq!(snapshot.items.len(), 10);
    assert_eq!(snapshot.items[0].id, "s-25");
    assert!(snapshot.has_more);

    list.load_more().await;
    list.load_more().await;
    let snapshot = list.snapshot().await;
    assert_eq!(snapshot.items.len(), 25);
    assert_eq!(snapshot.items.last().unwrap().id, "s-1");
    assert!(!snapshot.has_more);
}
