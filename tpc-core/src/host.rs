//! The element side of a chart binding.
//!
//! A chart lives on one element of the page. The binding never touches the
//! DOM directly: it asks the element for its trade attribute on every mount
//! and update, and for the id the renderer should draw into. The web crate
//! implements this for `web_sys::Element`; tests use an in-memory fake.

/// The element a chart is mounted on.
pub trait HostElement {
    /// Current value of an attribute, `None` when absent.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Identifier of the drawing surface the renderer should target.
    fn surface_id(&self) -> String;
}
