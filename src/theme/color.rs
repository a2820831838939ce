//! Theme palette

use serde::{Deserialize, Serialize};

use crate::config::ThemeConfig;
use crate::content::PostColors;

/// The four colors the page chrome is painted with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColor {
    pub dark: String,
    pub light: String,
    pub main: String,
    pub contrast: String,
}

impl ThemeColor {
    /// Palette for a post: its own colors plus the site's fixed contrast color
    pub fn from_post(colors: &PostColors, contrast: &str) -> Self {
        Self {
            dark: colors.dark.clone(),
            light: colors.light.clone(),
            main: colors.main.clone(),
            contrast: contrast.to_string(),
        }
    }

    /// Site-wide palette used before any post has been mounted
    pub fn site_default(theme: &ThemeConfig) -> Self {
        Self {
            dark: theme.default_dark.clone(),
            light: theme.default_light.clone(),
            main: theme.default_main.clone(),
            contrast: theme.contrast.clone(),
        }
    }

    /// CSS custom properties for the palette
    pub fn css_variables(&self) -> String {
        format!(
            ":root{{--color-primary-dark:{};--color-primary-light:{};--color-primary-main:{};--color-primary-contrast:{};}}",
            css_value(&self.dark),
            css_value(&self.light),
            css_value(&self.main),
            css_value(&self.contrast)
        )
    }
}

/// Drop characters that could end the declaration or the style element
fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_post_uses_fixed_contrast() {
        let colors = PostColors {
            dark: "#111".to_string(),
            light: "#eee".to_string(),
            main: "#888".to_string(),
        };
        let theme = ThemeColor::from_post(&colors, "#fff");
        assert_eq!(theme.main, "#888");
        assert_eq!(theme.contrast, "#fff");
    }

    #[test]
    fn test_css_variables() {
        let theme = ThemeColor {
            dark: "#111".to_string(),
            light: "#eee".to_string(),
            main: "red;}</style>".to_string(),
            contrast: "#fff".to_string(),
        };
        let css = theme.css_variables();
        assert!(css.contains("--color-primary-dark:#111;"));
        assert!(css.contains("--color-primary-main:red/style;"));
        assert!(!css.contains("</style>"));
    }
}
