//! Cache policy for pages that belong to a signed-in user.

/// Authenticated pages must never be stored by browsers or proxies.
pub const NO_STORE: &str = "no-store";

/// Header tuple for [`NO_STORE`].
pub const fn no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", NO_STORE)
}
