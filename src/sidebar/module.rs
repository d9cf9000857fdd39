//! Sidebar module records.
//!
//! A module is pure data: nothing renderable is stored on it. The `kind`
//! field doubles as the serialized `type` tag and carries the few fields only
//! some kinds need.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Kind of a sidebar module, with kind-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModuleKind {
    Player,
    PostCreator,
    GroupManager,
    GroupInfo {
        #[serde(default, rename = "groupId", skip_serializing_if = "Option::is_none")]
        group_id: Option<u64>,
    },
    PageSpecific {
        #[serde(rename = "pageType")]
        page_type: String,
    },
    QueueManager,
    Custom {
        #[serde(default)]
        description: String,
    },
}

/// Payload-free discriminant of [`ModuleKind`], used as a lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleType {
    Player,
    PostCreator,
    GroupManager,
    GroupInfo,
    PageSpecific,
    QueueManager,
    Custom,
}

impl ModuleKind {
    pub fn module_type(&self) -> ModuleType {
        match self {
            ModuleKind::Player => ModuleType::Player,
            ModuleKind::PostCreator => ModuleType::PostCreator,
            ModuleKind::GroupManager => ModuleType::GroupManager,
            ModuleKind::GroupInfo { .. } => ModuleType::GroupInfo,
            ModuleKind::PageSpecific { .. } => ModuleType::PageSpecific,
            ModuleKind::QueueManager => ModuleType::QueueManager,
            ModuleKind::Custom { .. } => ModuleType::Custom,
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModuleType::Player => "player",
            ModuleType::PostCreator => "post_creator",
            ModuleType::GroupManager => "group_manager",
            ModuleType::GroupInfo => "group_info",
            ModuleType::PageSpecific => "page_specific",
            ModuleType::QueueManager => "queue_manager",
            ModuleType::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// One entry in the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarModule {
    pub id: String,
    pub title: String,
    pub is_visible: bool,
    /// Display position; lower comes first.
    pub order: u32,
    /// Bound to one page (group page, profile page) rather than global.
    #[serde(default)]
    pub is_page_specific: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub settings: Map<String, Value>,
    /// Content may grow past the module's default height.
    #[serde(default)]
    pub can_overflow: bool,
    #[serde(flatten)]
    pub kind: ModuleKind,
}

impl SidebarModule {
    /// Visible, global module with no settings.
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: ModuleKind, order: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_visible: true,
            order,
            is_page_specific: false,
            page_id: None,
            permissions: Vec::new(),
            settings: Map::new(),
            can_overflow: false,
            kind,
        }
    }

    pub fn module_type(&self) -> ModuleType {
        self.kind.module_type()
    }
}

/// Partial update for [`SidebarModule`]. The kind cannot be changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModulePatch {
    pub title: Option<String>,
    pub is_visible: Option<bool>,
    pub order: Option<u32>,
    pub is_page_specific: Option<bool>,
    pub page_id: Option<Option<String>>,
    pub permissions: Option<Vec<String>>,
    pub settings: Option<Map<String, Value>>,
    pub can_overflow: Option<bool>,
}

impl ModulePatch {
    pub(crate) fn apply(self, module: &mut SidebarModule) {
        if let Some(title) = self.title {
            module.title = title;
        }
        if let Some(visible) = self.is_visible {
            module.is_visible = visible;
        }
        if let Some(order) = self.order {
            module.order = order;
        }
        if let Some(page_specific) = self.is_page_specific {
            module.is_page_specific = page_specific;
        }
        if let Some(page_id) = self.page_id {
            module.page_id = page_id;
        }
        if let Some(permissions) = self.permissions {
            module.permissions = permissions;
        }
        if let Some(settings) = self.settings {
            module.settings = settings;
        }
        if let Some(can_overflow) = self.can_overflow {
            module.can_overflow = can_overflow;
        }
    }
}

/// Modules a fresh sidebar starts with.
pub fn default_modules() -> Vec<SidebarModule> {
    vec![
        SidebarModule::new("player-module", "Player", ModuleKind::Player, 1),
        SidebarModule {
            can_overflow: true,
            ..SidebarModule::new(
                "queue-manager-module",
                "Play queue",
                ModuleKind::QueueManager,
                2,
            )
        },
        SidebarModule::new(
            "post-creator-module",
            "New post",
            ModuleKind::PostCreator,
            3,
        ),
        SidebarModule::new(
            "group-manager-module",
            "Group management",
            ModuleKind::GroupManager,
            4,
        ),
    ]
}
