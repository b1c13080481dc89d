/// Joins a base URL and a relative path with exactly one `/` between them
///
/// # Examples
///
/// ```
/// use shop_harvest::url::join_path;
///
/// assert_eq!(join_path("https://shop.example", "pages/about"), "https://shop.example/pages/about");
/// assert_eq!(join_path("https://shop.example/", "/"), "https://shop.example/");
/// ```
pub fn join_path(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Builds the ordered list of pages probed for contact links
///
/// The base URL comes first, followed by the base joined with each
/// configured contact path in order.
pub fn contact_candidates<S: AsRef<str>>(base: &str, contact_paths: &[S]) -> Vec<String> {
    std::iter::once(base.to_string())
        .chain(contact_paths.iter().map(|p| join_path(base, p.as_ref())))
        .collect()
}

/// Builds the listing page URL scanned for product handles
pub fn listing_url(base: &str, listing_path: &str) -> String {
    join_path(base, listing_path)
}

/// Fills the product detail template with a storefront base and a handle
///
/// # Examples
///
/// ```
/// use shop_harvest::url::product_detail_url;
///
/// assert_eq!(
///     product_detail_url("{shop}/products/{handle}.json", "https://shop.example", "blue-mug"),
///     "https://shop.example/products/blue-mug.json"
/// );
/// ```
pub fn product_detail_url(template: &str, base: &str, handle: &str) -> String {
    template
        .replace("{handle}", handle)
        .replace("{shop}", base.trim_end_matches('/'))
}
