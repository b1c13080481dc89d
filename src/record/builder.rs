use crate::record::{ContactRecord, ProductSlot, StorefrontResult};

/// Assembles a [`StorefrontResult`] from the outputs of the two pipelines
///
/// ```
/// use shop_harvest::record::{ContactRecord, ProductSummary, StorefrontResultBuilder};
///
/// let result = StorefrontResultBuilder::new("shop.example")
///     .contacts(ContactRecord::default())
///     .product_slots(vec![Some(ProductSummary { title: "Mug".into(), image: None })])
///     .build();
///
/// assert_eq!(result.get("title_1"), Some("Mug"));
/// ```
#[derive(Debug, Clone)]
pub struct StorefrontResultBuilder {
    url: String,
    contacts: ContactRecord,
    products: Vec<ProductSlot>,
}

impl StorefrontResultBuilder {
    /// Starts a record for the storefront address as given in the input
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            contacts: ContactRecord::default(),
            products: Vec::new(),
        }
    }

    pub fn contacts(mut self, contacts: ContactRecord) -> Self {
        self.contacts = contacts;
        self
    }

    /// Sets the product slots, in handle discovery order
    pub fn product_slots(mut self, products: Vec<ProductSlot>) -> Self {
        self.products = products;
        self
    }

    pub fn build(self) -> StorefrontResult {
        StorefrontResult {
            url: self.url,
            contacts: self.contacts,
            products: self.products,
        }
    }
}
