//! In-memory product store.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;

use storefront_core::{DomainError, DomainResult, Entity, Validate};

use crate::product::{Product, ProductDraft, ProductId, ProductValidator};

/// Ordered, process-lifetime collection of products.
///
/// A single lock guards every read and write, so identifier assignment and the
/// "ids are unique" invariant hold under concurrent callers. Reads hand out
/// clones; the underlying collection is never exposed.
#[derive(Debug)]
pub struct ProductStore {
    inner: RwLock<Vec<Product>>,
    validator: ProductValidator,
}

impl ProductStore {
    /// Empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
            validator: ProductValidator::new(),
        }
    }

    /// Store populated with the two startup records.
    pub fn seeded() -> Self {
        let store = Self::new();
        {
            let mut products = store.write();
            products.push(Product::new(ProductId(1), "Product1", Decimal::from(10)));
            products.push(Product::new(ProductId(2), "Product2", Decimal::from(20)));
        }
        store
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Products whose name contains `name` (case-sensitive). `None` or an empty
    /// filter returns everything, in insertion order.
    pub fn list(&self, name: Option<&str>) -> Vec<Product> {
        let products = self.read();
        match name.filter(|n| !n.is_empty()) {
            Some(needle) => products
                .iter()
                .filter(|p| p.name().contains(needle))
                .cloned()
                .collect(),
            None => products.clone(),
        }
    }

    pub fn get(&self, id: ProductId) -> DomainResult<Product> {
        self.read()
            .iter()
            .find(|p| p.id() == id)
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    /// Validate and append. The new id is one past the current maximum (1 when empty).
    pub fn create(&self, draft: ProductDraft) -> DomainResult<Product> {
        self.validator.validate(&draft)?;

        let mut products = self.write();
        let id = products
            .iter()
            .map(|p| p.id())
            .max()
            .map_or(ProductId(1), ProductId::next);

        let product = Product::from_draft(id, draft);
        products.push(product.clone());
        Ok(product)
    }

    /// Full update. Validation runs before the existence check.
    pub fn update(&self, id: ProductId, draft: ProductDraft) -> DomainResult<Product> {
        self.validator.validate(&draft)?;

        let mut products = self.write();
        let product = find_mut(&mut products, id)?;
        product.replace(draft);
        Ok(product.clone())
    }

    /// Partial update without validation; see [`Product::merge`] for which fields change.
    pub fn patch(&self, id: ProductId, draft: ProductDraft) -> DomainResult<Product> {
        let mut products = self.write();
        let product = find_mut(&mut products, id)?;
        product.merge(draft);
        Ok(product.clone())
    }

    pub fn delete(&self, id: ProductId) -> DomainResult<()> {
        let mut products = self.write();
        let index = products
            .iter()
            .position(|p| p.id() == id)
            .ok_or(DomainError::NotFound)?;
        products.remove(index);
        Ok(())
    }

    // Every mutation is applied whole under the lock, so a poisoned guard still
    // holds a consistent collection.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Product>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

fn find_mut(products: &mut [Product], id: ProductId) -> DomainResult<&mut Product> {
    products
        .iter_mut()
        .find(|p| p.id() == id)
        .ok_or(DomainError::NotFound)
}
