use crate::record::StorefrontResult;

/// The resolved slot of one requested storefront
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorefrontOutcome {
    /// The storefront was harvested
    Harvested(StorefrontResult),

    /// The harvest was aborted; the cause is logged, not kept
    Failed {
        /// The storefront address as given in the input
        url: String,
    },
}

impl StorefrontOutcome {
    /// The storefront address this slot belongs to
    pub fn url(&self) -> &str {
        match self {
            Self::Harvested(result) => result.url(),
            Self::Failed { url } => url,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Harvested(_))
    }

    pub fn result(&self) -> Option<&StorefrontResult> {
        match self {
            Self::Harvested(result) => Some(result),
            Self::Failed { .. } => None,
        }
    }
}

/// One outcome per requested storefront, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    slots: Vec<StorefrontOutcome>,
}

impl BatchOutcome {
    pub fn new(slots: Vec<StorefrontOutcome>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[StorefrontOutcome] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Successful results in input order, failure markers skipped
    pub fn successes(&self) -> impl Iterator<Item = &StorefrontResult> {
        self.slots.iter().filter_map(StorefrontOutcome::result)
    }

    /// Addresses of the storefronts whose harvest failed
    pub fn failures(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .filter(|slot| !slot.is_success())
            .map(StorefrontOutcome::url)
    }
}
