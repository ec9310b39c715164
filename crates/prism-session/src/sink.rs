//! # Style Sink
//!
//! Where an accepted theme's variables end up.
//!
//! ## Apply Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply({primary-color: #6366f1, …}, "neumorphic")                       │
//! │                                                                         │
//! │  variables (before)            variables (after)                        │
//! │  --primary-color: #3b82f6  ──► --primary-color: #6366f1                 │
//! │  --shadow: …               ──► --shadow: …                              │
//! │  --accent: red             ──► --accent: red        (stale, kept)       │
//! │                                                                         │
//! │  active class: theme-default ─► theme-neumorphic    (replaced)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Variables a previous theme set but the new one does not are left in
//! place. The marker class is always exactly one `theme-<id>`.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use prism_core::{marker_class, CssVariables};
use tracing::debug;

/// Receives the variable map of every theme the session activates.
///
/// Implementations must be idempotent: applying the same theme twice leaves
/// the surface as a single apply would.
pub trait StyleSink: Send + Sync {
    /// Publishes `variables` (as `--<name>`) and marks `theme_id` active.
    fn apply(&self, variables: &CssVariables, theme_id: &str);
}

impl<T: StyleSink + ?Sized> StyleSink for Arc<T> {
    fn apply(&self, variables: &CssVariables, theme_id: &str) {
        (**self).apply(variables, theme_id)
    }
}

#[derive(Debug, Default)]
struct SurfaceState {
    /// Keyed by full custom property name (`--primary-color`).
    properties: BTreeMap<String, String>,
    active_class: Option<String>,
    applied_count: u64,
}

/// In-process style surface.
///
/// Holds the root custom properties and the active theme marker behind a
/// single lock, so readers see either the previous theme or the new one.
///
/// ## Usage
/// ```rust,ignore
/// let surface = Arc::new(PresentationSurface::new());
/// let session = ThemeSession::new(store, surface.clone());
///
/// session.initialize().await?;
/// let stylesheet = surface.to_css();
/// ```
#[derive(Debug, Default)]
pub struct PresentationSurface {
    state: RwLock<SurfaceState>,
}

impl PresentationSurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a variable, by bare name (`primary-color`).
    pub fn variable(&self, name: &str) -> Option<String> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.properties.get(&custom_property(name)).cloned()
    }

    /// Returns the active marker class (`theme-<id>`), if any theme was applied.
    pub fn active_class(&self) -> Option<String> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.active_class.clone()
    }

    /// Number of times a theme has been applied.
    pub fn applied_count(&self) -> u64 {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.applied_count
    }

    /// Returns every custom property currently set, keyed `--<name>`.
    pub fn properties(&self) -> BTreeMap<String, String> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.properties.clone()
    }

    /// Renders the current properties as a `:root` stylesheet block.
    ///
    /// ```text
    /// :root {
    ///   --background-color: #ffffff;
    ///   --border-radius: 0.5rem;
    ///   ...
    /// }
    /// ```
    pub fn to_css(&self) -> String {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);

        let mut css = String::from(":root {\n");
        for (property, value) in &state.properties {
            css.push_str("  ");
            css.push_str(property);
            css.push_str(": ");
            css.push_str(value);
            css.push_str(";\n");
        }
        css.push_str("}\n");
        css
    }
}

impl StyleSink for PresentationSurface {
    fn apply(&self, variables: &CssVariables, theme_id: &str) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        for (name, value) in variables {
            state.properties.insert(custom_property(name), value.clone());
        }
        state.active_class = Some(marker_class(theme_id));
        state.applied_count += 1;

        debug!(
            theme_id = %theme_id,
            variables = variables.len(),
            "Applied theme to presentation surface"
        );
    }
}

fn custom_property(name: &str) -> String {
    format!("--{name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::builtin::builtin_themes;

    #[test]
    fn test_apply_sets_prefixed_variables_and_marker() {
        let surface = PresentationSurface::new();
        let theme = &builtin_themes()[1];

        surface.apply(&theme.css_variables, &theme.id);

        assert_eq!(surface.variable("primary-color").as_deref(), Some("#6366f1"));
        assert!(surface.properties().keys().all(|k| k.starts_with("--")));
        assert_eq!(surface.properties().len(), 6);
        assert_eq!(surface.active_class().as_deref(), Some("theme-neumorphic"));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let once = PresentationSurface::new();
        let twice = PresentationSurface::new();
        let theme = &builtin_themes()[3];

        once.apply(&theme.css_variables, &theme.id);
        twice.apply(&theme.css_variables, &theme.id);
        twice.apply(&theme.css_variables, &theme.id);

        assert_eq!(once.properties(), twice.properties());
        assert_eq!(once.active_class(), twice.active_class());
        assert_eq!(once.to_css(), twice.to_css());
    }

    #[test]
    fn test_marker_is_replaced_and_stale_variables_kept() {
        let surface = PresentationSurface::new();
        let themes = builtin_themes();

        let mut first = themes[0].css_variables.clone();
        first.insert("accent".to_string(), "red".to_string());
        surface.apply(&first, "default");
        surface.apply(&themes[2].css_variables, "minimalist");

        assert_eq!(surface.active_class().as_deref(), Some("theme-minimalist"));
        assert_eq!(surface.variable("accent").as_deref(), Some("red"));
        assert_eq!(surface.variable("primary-color").as_deref(), Some("#000000"));
        assert_eq!(surface.applied_count(), 2);
    }

    #[test]
    fn test_to_css() {
        let surface = PresentationSurface::new();
        assert_eq!(surface.to_css(), ":root {\n}\n");

        surface.apply(&builtin_themes()[0].css_variables, "default");
        let css = surface.to_css();

        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --primary-color: #3b82f6;\n"));
        assert!(css.contains("  --border-radius: 0.5rem;\n"));
    }
}
