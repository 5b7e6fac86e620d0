use serde::{Deserialize, Serialize};

/// Horizontal space category the render layer is laying containers out in.
///
/// Split containers show both panes side by side in regular layouts and fall
/// back to their compact projection otherwise. Settings may pin one with
/// `forced-size-class = "compact"` or `"regular"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HorizontalSizeClass {
    Compact,
    Regular,
}

/// Visibility of a tab bar for a given tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarVisibility {
    Automatic,
    Visible,
    Hidden,
}
