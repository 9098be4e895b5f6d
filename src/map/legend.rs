//! Legend overlay shown on the map.

use serde::Serialize;

/// One swatch and its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    /// CSS color of the swatch.
    pub color: &'static str,
    /// Text shown next to the swatch.
    pub label: &'static str,
}

/// Which legend to overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendVariant {
    /// NDVI scale, used when both years are the same.
    Ndvi,
    /// Change scale, used when comparing two different years.
    Change,
}

const NDVI_ENTRIES: [LegendEntry; 3] = [
    LegendEntry {
        color: "brown",
        label: "Bajo",
    },
    LegendEntry {
        color: "yellow",
        label: "Medio",
    },
    LegendEntry {
        color: "green",
        label: "Alto",
    },
];

const CHANGE_ENTRIES: [LegendEntry; 3] = [
    LegendEntry {
        color: "red",
        label: "Perdida",
    },
    LegendEntry {
        color: "white",
        label: "Sin cambio",
    },
    LegendEntry {
        color: "green",
        label: "Ganancia",
    },
];

/// Picks the legend for a pair of years.
#[must_use]
pub fn select_legend(year1: i32, year2: i32) -> LegendVariant {
    if year1 == year2 {
        LegendVariant::Ndvi
    } else {
        LegendVariant::Change
    }
}

impl LegendVariant {
    /// Bold heading of the legend box.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Ndvi => "NDVI",
            Self::Change => "Cambio NDVI",
        }
    }

    /// Swatches, low to high.
    #[must_use]
    pub fn entries(self) -> &'static [LegendEntry] {
        match self {
            Self::Ndvi => &NDVI_ENTRIES,
            Self::Change => &CHANGE_ENTRIES,
        }
    }

    /// HTML fragment pinned to the bottom-left corner of the map panel.
    #[must_use]
    pub fn to_html(self) -> String {
        let mut html = String::from(
            "<div class=\"map-legend\" style=\"position: absolute; bottom: 40px; left: 40px; \
             background: rgba(255,255,255,0.8); padding: 8px; border: 1px solid gray; \
             border-radius: 8px; font-size: 14px; z-index: 9999;\">\n",
        );
        html.push_str(&format!("  <b>{}</b><br>\n", self.title()));
        for entry in self.entries() {
            html.push_str(&format!(
                "  <div style=\"display: flex; align-items: center;\">\n    \
                 <div style=\"background:{};width:20px;height:20px;\
                 border:1px solid #555;\"></div>\n    \
                 <div style=\"margin-left:6px;\">{}</div>\n  </div>\n",
                entry.color, entry.label
            ));
        }
        html.push_str("</div>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ndvi::years::{BASE_YEARS, CURRENT_YEARS};

    #[test]
    fn change_legend_iff_years_differ() {
        let years: Vec<i32> = BASE_YEARS.into_iter().chain(CURRENT_YEARS).collect();
        for &year1 in &years {
            for &year2 in &years {
                let expected = if year1 == year2 {
                    LegendVariant::Ndvi
                } else {
                    LegendVariant::Change
                };
                assert_eq!(select_legend(year1, year2), expected, "{year1} vs {year2}");
            }
        }
    }

    #[test]
    fn selection_ignores_order() {
        assert_eq!(select_legend(2023, 2015), LegendVariant::Change);
        assert_eq!(select_legend(2015, 2023), LegendVariant::Change);
    }

    #[test]
    fn ndvi_legend_html_lists_low_medium_high() {
        let html = LegendVariant::Ndvi.to_html();
        assert!(html.contains("<b>NDVI</b>"));
        let positions: Vec<usize> =
            ["background:brown", "Bajo", "background:yellow", "Medio", "background:green", "Alto"]
                .iter()
                .map(|needle| html.find(needle).unwrap())
                .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn change_legend_html_lists_loss_none_gain() {
        let html = LegendVariant::Change.to_html();
        assert!(html.contains("<b>Cambio NDVI</b>"));
        assert!(html.contains("background:red"));
        assert!(html.contains("Sin cambio"));
        assert!(html.contains("Ganancia"));
        assert!(!html.contains("Bajo"));
    }

    #[test]
    fn legend_is_anchored_bottom_left() {
        let html = LegendVariant::Change.to_html();
        assert!(html.contains("position: absolute"));
        assert!(html.contains("bottom: 40px"));
        assert!(html.contains("left: 40px"));
        assert!(html.contains("rgba(255,255,255,0.8)"));
    }
}
