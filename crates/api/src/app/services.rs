use std::sync::Arc;

use storefront_core::{DomainError, DomainResult, Entity};
use storefront_products::{Product, ProductDraft, ProductId, ProductStore};

/// Shared application state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppServices {
    products: Arc<ProductStore>,
}

/// Production wiring: the store starts with its seed records.
pub fn build_services() -> AppServices {
    AppServices::new(Arc::new(ProductStore::seeded()))
}

impl AppServices {
    pub fn new(products: Arc<ProductStore>) -> Self {
        Self { products }
    }

    pub fn products_list(&self, name: Option<&str>) -> Vec<Product> {
        self.products.list(name)
    }

    pub fn products_get(&self, id: ProductId) -> DomainResult<Product> {
        self.products.get(id)
    }

    pub fn products_create(&self, draft: ProductDraft) -> DomainResult<Product> {
        let result = self.products.create(draft);
        match &result {
            Ok(p) => tracing::info!(product_id = %p.id(), name = p.name(), "product created"),
            Err(e) => log_rejection("create", None, e),
        }
        result
    }

    pub fn products_update(&self, id: ProductId, draft: ProductDraft) -> DomainResult<Product> {
        let result = self.products.update(id, draft);
        match &result {
            Ok(p) => tracing::info!(product_id = %p.id(), name = p.name(), "product updated"),
            Err(e) => log_rejection("update", Some(id), e),
        }
        result
    }

    pub fn products_patch(&self, id: ProductId, draft: ProductDraft) -> DomainResult<Product> {
        let result = self.products.patch(id, draft);
        match &result {
            Ok(p) => tracing::info!(product_id = %p.id(), name = p.name(), "product patched"),
            Err(e) => log_rejection("patch", Some(id), e),
        }
        result
    }

    pub fn products_delete(&self, id: ProductId) -> DomainResult<()> {
        let result = self.products.delete(id);
        match &result {
            Ok(()) => tracing::info!(product_id = %id, "product deleted"),
            Err(e) => log_rejection("delete", Some(id), e),
        }
        result
    }
}

fn log_rejection(operation: &'static str, id: Option<ProductId>, err: &DomainError) {
    let product_id = id.map(|id| id.value());
    tracing::debug!(operation, ?product_id, "product {operation} rejected: {err}");
}
