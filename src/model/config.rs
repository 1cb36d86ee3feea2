use serde::{Deserialize, Serialize};

/// Configuration from gtdo.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

/// How ranks map onto the screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Column-major grid: top to bottom, then left to right
    #[default]
    Grid,
    /// Single vertical column
    List,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub mode: LayoutMode,
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,
    #[serde(default = "default_cell_height")]
    pub cell_height: f64,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            mode: LayoutMode::Grid,
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Include done tasks in the active collection
    #[serde(default)]
    pub show_done: bool,
    /// Title of the synthetic root of the dependency tree
    #[serde(default = "default_root_label")]
    pub root_label: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            show_done: false,
            root_label: default_root_label(),
        }
    }
}

fn default_cell_width() -> f64 {
    300.0
}

fn default_cell_height() -> f64 {
    84.0
}

fn default_viewport_width() -> f64 {
    1200.0
}

fn default_viewport_height() -> f64 {
    600.0
}

fn default_root_label() -> String {
    crate::ops::hierarchy::ROOT_LABEL.to_string()
}
