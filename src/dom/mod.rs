//! Element collaborator consumed by views.
//!
//! The crate ships no DOM. A view holds whatever render target the host
//! application supplies, seen only through this narrow query surface.

use std::sync::Arc;

/// A scoped handle into a render target.
///
/// `find` narrows the handle by selector; `html` replaces the content
/// under the handle. Implementations decide what a selector means.
pub trait Queryable: Send + Sync {
    /// Scoped sub-query within this handle.
    fn find(&self, selector: &str) -> Arc<dyn Queryable>;

    /// Replace the content under this handle.
    fn html(&self, markup: &str);

    /// Current content under this handle.
    fn text(&self) -> String;
}
