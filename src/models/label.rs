use std::collections::HashMap;

pub const FALLBACK_COLOR: &str = "#95a5a6";
pub const UNKNOWN_LABEL_DISPLAY: &str = "Unbekannt";

const LABEL_COLORS: &[(&str, &str)] = &[
    ("outside", "#e74c3c"),
    ("polyp", "#f39c12"),
    ("needle", "#3498db"),
    ("blood", "#e74c3c"),
    ("snare", "#9b59b6"),
    ("grasper", "#2ecc71"),
    ("water_jet", "#1abc9c"),
    ("appendix", "#f1c40f"),
    ("ileum", "#e67e22"),
    ("diverticule", "#34495e"),
    ("ileocaecalvalve", "#95a5a6"),
    ("nbi", "#8e44ad"),
    ("low_quality", "#7f8c8d"),
    ("wound", "#c0392b"),
];

const DEFAULT_TRANSLATIONS: &[(&str, &str)] = &[
    ("appendix", "Appendix"),
    ("blood", "Blut"),
    ("diverticule", "Divertikel"),
    ("grasper", "Greifer"),
    ("ileocaecalvalve", "Ileozäkalklappe"),
    ("ileum", "Ileum"),
    ("low_quality", "Niedrige Bildqualität"),
    ("nbi", "Narrow Band Imaging"),
    ("needle", "Nadel"),
    ("outside", "Außerhalb"),
    ("polyp", "Polyp"),
    ("snare", "Snare"),
    ("water_jet", "Wasserstrahl"),
    ("wound", "Wunde"),
];

/// Pure label → colour / display-name lookup.
#[derive(Debug, Clone)]
pub struct LabelCatalog {
    colors: HashMap<String, String>,
    translations: HashMap<String, String>,
}

impl Default for LabelCatalog {
    fn default() -> Self {
        Self {
            colors: LABEL_COLORS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            translations: DEFAULT_TRANSLATIONS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl LabelCatalog {
    /// Defaults plus caller-supplied translations, which win on conflict.
    pub fn with_translations(overrides: &HashMap<String, String>) -> Self {
        let mut catalog = Self::default();
        for (key, value) in overrides {
            catalog.translations.insert(key.clone(), value.clone());
        }
        catalog
    }

    pub fn color(&self, label: &str) -> &str {
        self.colors
            .get(label)
            .map(String::as_str)
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn display_name(&self, label: &str) -> String {
        if label.is_empty() {
            return UNKNOWN_LABEL_DISPLAY.to_string();
        }
        self.translations
            .get(label)
            .cloned()
            .unwrap_or_else(|| label.to_string())
    }

    /// Prefer the store's own display string when the label key is unknown.
    pub fn display_for(&self, label: &str, store_display: Option<&str>) -> String {
        if !label.is_empty() {
            return self.display_name(label);
        }
        match store_display {
            Some(display) if !display.is_empty() => display.to_string(),
            _ => UNKNOWN_LABEL_DISPLAY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_have_palette_colors() {
        let catalog = LabelCatalog::default();
        assert_eq!(catalog.color("polyp"), "#f39c12");
        assert_eq!(catalog.color("mystery"), FALLBACK_COLOR);
    }

    #[test]
    fn overrides_replace_default_translation() {
        let mut overrides = HashMap::new();
        overrides.insert("polyp".to_string(), "Polyp (en)".to_string());
        let catalog = LabelCatalog::with_translations(&overrides);
        assert_eq!(catalog.display_name("polyp"), "Polyp (en)");
        assert_eq!(catalog.display_name("blood"), "Blut");
        assert_eq!(catalog.display_name("custom"), "custom");
    }

    #[test]
    fn empty_label_falls_back() {
        let catalog = LabelCatalog::default();
        assert_eq!(catalog.display_for("", Some("Sonstiges")), "Sonstiges");
        assert_eq!(catalog.display_for("", None), UNKNOWN_LABEL_DISPLAY);
    }
}
