use serde::{Deserialize, Serialize};

use crate::core::geometry::Padding;
use crate::core::platform::Platform;
use crate::core::trigger::TriggerDef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceMode {
    #[default]
    Visual,
    Source,
}

impl SurfaceMode {
    pub fn name(&self) -> &'static str {
        match self {
            SurfaceMode::Visual => "visual",
            SurfaceMode::Source => "source",
        }
    }
}

/// Per-surface options. Collaborators that cannot be serialized (registries,
/// layout host, window managers) travel separately in `SurfaceDeps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attached_root: Option<usize>,
    pub mode: SurfaceMode,
    pub overlay_padding: Padding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_commands: Option<Vec<String>>,
    pub exclude_commands: Vec<String>,
    /// Paste policy handed to the data-transfer layer untouched.
    pub import_rules: serde_json::Value,
    pub multiline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub read_only: bool,
    pub null_selection_on_blur: bool,
    pub in_dialog: bool,
    pub in_target_widget: bool,
    pub debug: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            attached_root: None,
            mode: SurfaceMode::Visual,
            overlay_padding: Padding::default(),
            include_commands: None,
            exclude_commands: Vec::new(),
            import_rules: serde_json::Value::Null,
            multiline: true,
            placeholder: None,
            read_only: false,
            null_selection_on_blur: true,
            in_dialog: false,
            in_target_widget: false,
            debug: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolGroupConfig {
    pub name: String,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolbarConfig {
    pub floatable: bool,
    /// Distance from the top of the scroll container at which the toolbar floats.
    pub scroll_offset: f64,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            floatable: true,
            scroll_offset: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRule {
    pub command: String,
    pub trigger: TriggerDef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetConfig {
    pub modes: Vec<SurfaceMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_mode: Option<SurfaceMode>,
    pub platform: Platform,
    pub toolbar: ToolbarConfig,
    pub toolbar_groups: Vec<ToolGroupConfig>,
    pub action_groups: Vec<ToolGroupConfig>,
    pub document_commands: Vec<String>,
    pub target_commands: Vec<String>,
    pub triggers: Vec<TriggerRule>,
    pub surface: SurfaceConfig,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            modes: vec![SurfaceMode::Visual, SurfaceMode::Source],
            default_mode: None,
            platform: Platform::default(),
            toolbar: ToolbarConfig::default(),
            toolbar_groups: default_toolbar_groups(),
            action_groups: vec![ToolGroupConfig {
                name: "actions".to_string(),
                include: vec!["findAndReplace".to_string(), "commandHelp".to_string()],
                label: None,
            }],
            document_commands: vec!["commandHelp".to_string()],
            target_commands: vec!["findAndReplace".to_string(), "findNext".to_string()],
            triggers: Vec::new(),
            surface: SurfaceConfig::default(),
        }
    }
}

fn default_toolbar_groups() -> Vec<ToolGroupConfig> {
    vec![
        ToolGroupConfig {
            name: "history".to_string(),
            include: vec!["undo".to_string(), "redo".to_string()],
            label: None,
        },
        ToolGroupConfig {
            name: "format".to_string(),
            include: vec![
                "paragraph".to_string(),
                "heading1".to_string(),
                "heading2".to_string(),
                "preformatted".to_string(),
            ],
            label: Some("Format".to_string()),
        },
        ToolGroupConfig {
            name: "style".to_string(),
            include: vec!["bold".to_string(), "italic".to_string()],
            label: None,
        },
    ]
}
