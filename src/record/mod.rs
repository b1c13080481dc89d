//! Harvest records
//!
//! This module defines the values that flow out of the harvester:
//! - `ContactRecord` for the contact pipeline
//! - `ProductSummary` slots for the product pipeline
//! - `StorefrontResult`, the merged record for one storefront
//! - `BatchOutcome`, one success-or-failure slot per requested storefront

mod builder;
mod outcome;

pub use builder::StorefrontResultBuilder;
pub use outcome::{BatchOutcome, StorefrontOutcome};

/// Report column for the contact email
pub const EMAIL_FIELD: &str = "email";
/// Report column for the Facebook link
pub const FACEBOOK_FIELD: &str = "facebook";
/// Report column for the Twitter link
pub const TWITTER_FIELD: &str = "twitter";
/// Report column for the originating storefront address
pub const URL_FIELD: &str = "url";

/// Contact channels discovered on a storefront
///
/// Each field is independently optional; a storefront with no contact page
/// yields the default, all-absent record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactRecord {
    pub email: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
}

impl ContactRecord {
    /// Returns true if no contact channel was found
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.facebook.is_none() && self.twitter.is_none()
    }
}

/// Title and lead image of one product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    pub title: String,
    pub image: Option<String>,
}

/// A product position that either holds a summary or marks a failed fetch
///
/// Slot `n` in a `Vec<ProductSlot>` is reported with the 1-based index `n + 1`.
pub type ProductSlot = Option<ProductSummary>;

/// Key of the `title_i` column
pub fn title_field(index: usize) -> String {
    format!("title_{}", index)
}

/// Key of the `image_i` column
pub fn image_field(index: usize) -> String {
    format!("image_{}", index)
}

/// The merged record of one successfully harvested storefront
///
/// Built with [`StorefrontResultBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontResult {
    url: String,
    contacts: ContactRecord,
    products: Vec<ProductSlot>,
}

impl StorefrontResult {
    /// The storefront address exactly as it appeared in the input
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn contacts(&self) -> &ContactRecord {
        &self.contacts
    }

    /// Product slots in discovery order, failed fetches included as `None`
    pub fn products(&self) -> &[ProductSlot] {
        &self.products
    }

    /// Number of product slots that hold a summary
    pub fn product_count(&self) -> usize {
        self.products.iter().filter(|slot| slot.is_some()).count()
    }

    /// Flattens the record into ordered `(column, value)` pairs
    ///
    /// The three contact columns are always present (possibly without a
    /// value). `title_i`/`image_i` appear only for slots that hold a summary,
    /// `image_i` only when that product has an image. `url` comes last.
    pub fn fields(&self) -> Vec<(String, Option<&str>)> {
        let mut fields = vec![
            (EMAIL_FIELD.to_string(), self.contacts.email.as_deref()),
            (FACEBOOK_FIELD.to_string(), self.contacts.facebook.as_deref()),
            (TWITTER_FIELD.to_string(), self.contacts.twitter.as_deref()),
        ];

        for (position, slot) in self.products.iter().enumerate() {
            let Some(product) = slot else { continue };
            let index = position + 1;
            fields.push((title_field(index), Some(product.title.as_str())));
            if let Some(image) = &product.image {
                fields.push((image_field(index), Some(image.as_str())));
            }
        }

        fields.push((URL_FIELD.to_string(), Some(self.url.as_str())));
        fields
    }

    /// Number of columns this record contributes to the report
    pub fn field_count(&self) -> usize {
        4 + self
            .products
            .iter()
            .flatten()
            .map(|p| if p.image.is_some() { 2 } else { 1 })
            .sum::<usize>()
    }

    /// Looks up a single column value
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .find(|(key, _)| key == field)
            .and_then(|(_, value)| value)
    }
}
