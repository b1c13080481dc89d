use crate::UrlError;
use url::Url;

/// Prefix added to storefront addresses that arrive without a scheme
pub const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Prepends `https://` to a storefront address that has no scheme
///
/// Addresses already starting with `http://` or `https://` (any case) are
/// returned untouched. Anything else that opens with an explicit `scheme://`
/// is also left alone so that [`storefront_base`] can reject it. A `://`
/// later in the path or query does not count as a scheme.
///
/// # Examples
///
/// ```
/// use shop_harvest::url::ensure_scheme;
///
/// assert_eq!(ensure_scheme("shop.example"), "https://shop.example");
/// assert_eq!(ensure_scheme("http://shop.example"), "http://shop.example");
/// ```
pub fn ensure_scheme(url_str: &str) -> String {
    if has_explicit_scheme(url_str) {
        url_str.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, url_str)
    }
}

/// True when the address opens with `scheme://`
///
/// The scheme must be `[A-Za-z][A-Za-z0-9+.-]*`, which rules out any `/`,
/// `?` or `#` before the `://`.
fn has_explicit_scheme(url_str: &str) -> bool {
    let Some((scheme, _)) = url_str.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
        }
        _ => false,
    }
}

/// Resolves a storefront address into the base URL every fetch is built from
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Prepend `https://` when no scheme is present
/// 3. Parse the URL; reject if malformed, non-HTTP(S), or host-less
/// 4. Drop trailing slashes so relative paths can be appended with one `/`
///
/// The path of the address is kept as written, so a storefront mounted under
/// a sub-path (`shop.example/en`) probes `shop.example/en/pages/about`.
///
/// # Returns
///
/// * `Ok(String)` - Base URL without a trailing slash
/// * `Err(UrlError)` - The address cannot be fetched
///
/// # Examples
///
/// ```
/// use shop_harvest::url::storefront_base;
///
/// assert_eq!(storefront_base("shop.example/").unwrap(), "https://shop.example");
/// assert!(storefront_base("ftp://shop.example").is_err());
/// ```
pub fn storefront_base(storefront: &str) -> Result<String, UrlError> {
    let with_scheme = ensure_scheme(storefront.trim());

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlError::MissingDomain),
    }

    Ok(with_scheme.trim_end_matches('/').to_string())
}
