//! # Theme Catalog
//!
//! Ordered, id-unique registry of theme definitions.
//!
//! ## Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  themes: Vec<Theme>            (display order = insertion order)       │
//! │  ┌─────────┬────────────┬────────────┬───────┬──────┬──────────────┐   │
//! │  │ default │ neumorphic │ minimalist │ retro │ glow │ custom-…     │   │
//! │  └─────────┴────────────┴────────────┴───────┴──────┴──────────────┘   │
//! │                                                        ▲               │
//! │                                          create() / insert() append    │
//! │                                                                         │
//! │  index: HashMap<id, position>  (O(1) get, duplicate detection)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog never overwrites: an id that is already registered is an
//! error, never a replacement.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::{NewTheme, Theme};
use crate::CUSTOM_THEME_PREFIX;

/// Ordered theme registry.
#[derive(Debug, Clone, Default)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
    index: HashMap<String, usize>,
}

impl ThemeCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from themes in display order.
    ///
    /// ## Returns
    /// * `Err(CoreError::DuplicateTheme)` - two themes share an id
    pub fn from_themes(themes: Vec<Theme>) -> CoreResult<Self> {
        let mut catalog = ThemeCatalog {
            themes: Vec::with_capacity(themes.len()),
            index: HashMap::with_capacity(themes.len()),
        };
        for theme in themes {
            catalog.insert(theme)?;
        }
        Ok(catalog)
    }

    /// Returns every theme in catalog order.
    pub fn list(&self) -> &[Theme] {
        &self.themes
    }

    /// Looks up a theme by id.
    pub fn get(&self, id: &str) -> CoreResult<&Theme> {
        self.index
            .get(id)
            .map(|&position| &self.themes[position])
            .ok_or_else(|| CoreError::ThemeNotFound(id.to_string()))
    }

    /// Returns true if a theme with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of registered themes.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Returns true if the catalog holds no themes.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Theme ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|theme| theme.id.as_str())
    }

    /// Appends a theme that already carries an id (e.g. one the store created).
    pub fn insert(&mut self, theme: Theme) -> CoreResult<&Theme> {
        if self.index.contains_key(&theme.id) {
            return Err(CoreError::DuplicateTheme(theme.id));
        }
        let position = self.themes.len();
        self.index.insert(theme.id.clone(), position);
        self.themes.push(theme);
        Ok(&self.themes[position])
    }

    /// Creates a custom theme under a freshly generated id and appends it.
    ///
    /// The payload is validated first; `seo_optimized` is always true.
    pub fn create(&mut self, data: NewTheme) -> CoreResult<&Theme> {
        data.validate()?;

        let mut id = generate_theme_id();
        while self.index.contains_key(&id) {
            id = generate_theme_id();
        }
        self.insert(data.into_theme(id))
    }

    /// Consumes the catalog, returning the themes in order.
    pub fn into_themes(self) -> Vec<Theme> {
        self.themes
    }
}

/// Generates a new custom theme id (`custom-<uuid v4>`).
pub fn generate_theme_id() -> String {
    format!("{}{}", CUSTOM_THEME_PREFIX, Uuid::new_v4().simple())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::builtin_themes;
    use crate::types::Role;
    use std::collections::BTreeSet;

    fn new_theme(name: &str) -> NewTheme {
        NewTheme {
            name: name.to_string(),
            description: String::new(),
            is_premium: false,
            super_admin_only: false,
            allowed_roles: BTreeSet::from([Role::User]),
            css_variables: builtin_themes().remove(0).css_variables,
        }
    }

    #[test]
    fn test_list_preserves_order() {
        let catalog = ThemeCatalog::from_themes(builtin_themes()).unwrap();
        let ids: Vec<&str> = catalog.ids().collect();
        assert_eq!(ids, ["default", "neumorphic", "minimalist", "retro", "glow"]);
    }

    #[test]
    fn test_get() {
        let catalog = ThemeCatalog::from_themes(builtin_themes()).unwrap();
        assert_eq!(catalog.get("retro").unwrap().name, "Retro");
        assert!(matches!(
            catalog.get("missing"),
            Err(CoreError::ThemeNotFound(ref id)) if id == "missing"
        ));
    }

    #[test]
    fn test_from_themes_rejects_duplicates() {
        let mut themes = builtin_themes();
        themes.push(themes[0].clone());
        assert!(matches!(
            ThemeCatalog::from_themes(themes),
            Err(CoreError::DuplicateTheme(_))
        ));
    }

    #[test]
    fn test_insert_never_overwrites() {
        let mut catalog = ThemeCatalog::from_themes(builtin_themes()).unwrap();
        let mut impostor = catalog.get("default").unwrap().clone();
        impostor.name = "Impostor".to_string();

        assert!(catalog.insert(impostor).is_err());
        assert_eq!(catalog.get("default").unwrap().name, "Default");
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_create_appends_with_fresh_id() {
        let mut catalog = ThemeCatalog::from_themes(builtin_themes()).unwrap();

        let first = catalog.create(new_theme("Ocean")).unwrap().id.clone();
        let second = catalog.create(new_theme("Forest")).unwrap().id.clone();

        assert_ne!(first, second);
        assert!(first.starts_with(CUSTOM_THEME_PREFIX));
        assert_eq!(catalog.len(), 7);

        let ids: Vec<&str> = catalog.ids().collect();
        assert_eq!(ids[5], first);
        assert_eq!(ids[6], second);

        let created = catalog.get(&first).unwrap();
        assert!(created.seo_optimized);
        assert_eq!(created.name, "Ocean");
    }

    #[test]
    fn test_create_rejects_invalid_payload() {
        let mut catalog = ThemeCatalog::new();
        let mut data = new_theme("Broken");
        data.css_variables.clear();

        assert!(matches!(
            catalog.create(data),
            Err(CoreError::Validation(_))
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_generated_ids_are_valid_theme_ids() {
        let id = generate_theme_id();
        crate::validation::validate_theme_id(&id).unwrap();
    }
}
