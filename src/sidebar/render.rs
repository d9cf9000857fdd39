//! Presentation-time rendering of sidebar modules.
//!
//! Rendering strategies live in a side table keyed by [`ModuleType`] and are
//! looked up when a module is displayed. Module records never reference
//! them, so persisting a module never has to strip anything.

use super::module::{ModuleKind, ModuleType, SidebarModule};
use std::collections::BTreeMap;

/// Turns a module record into displayable text.
pub trait RenderStrategy: Send + Sync {
    fn render(&self, module: &SidebarModule) -> String;
}

impl<F> RenderStrategy for F
where
    F: Fn(&SidebarModule) -> String + Send + Sync,
{
    fn render(&self, module: &SidebarModule) -> String {
        self(module)
    }
}

/// Fixed placeholder text, whatever the module holds.
struct Placeholder(&'static str);

impl RenderStrategy for Placeholder {
    fn render(&self, _module: &SidebarModule) -> String {
        self.0.to_string()
    }
}

/// `module type → strategy` lookup.
#[derive(Default)]
pub struct RenderTable {
    strategies: BTreeMap<ModuleType, Box<dyn RenderStrategy>>,
}

impl std::fmt::Debug for RenderTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.strategies.keys()).finish()
    }
}

impl RenderTable {
    /// Table with no strategies registered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register (or replace) the strategy for a module type.
    pub fn register(&mut self, module_type: ModuleType, strategy: impl RenderStrategy + 'static) {
        self.strategies.insert(module_type, Box::new(strategy));
    }

    pub fn with(mut self, module_type: ModuleType, strategy: impl RenderStrategy + 'static) -> Self {
        self.register(module_type, strategy);
        self
    }

    /// Render a module, or `None` when its type has no strategy.
    pub fn render(&self, module: &SidebarModule) -> Option<String> {
        self.strategies
            .get(&module.module_type())
            .map(|strategy| strategy.render(module))
    }
}

/// Placeholder strategies for every built-in module type.
pub fn default_render_table() -> RenderTable {
    RenderTable::empty()
        .with(ModuleType::Player, Placeholder("Mini player"))
        .with(ModuleType::QueueManager, Placeholder("Play queue"))
        .with(
            ModuleType::PostCreator,
            Placeholder("Post creation tools will appear here"),
        )
        .with(
            ModuleType::GroupManager,
            Placeholder("Group management tools will appear here"),
        )
        .with(ModuleType::GroupInfo, |module: &SidebarModule| {
            match &module.kind {
                ModuleKind::GroupInfo {
                    group_id: Some(id),
                } => format!("Loading information for group {id}..."),
                _ => "Loading group information...".to_string(),
            }
        })
        .with(ModuleType::PageSpecific, |module: &SidebarModule| {
            match &module.kind {
                ModuleKind::PageSpecific { page_type } => format!("{page_type} page tools"),
                _ => String::new(),
            }
        })
        .with(ModuleType::Custom, |module: &SidebarModule| match &module.kind {
            ModuleKind::Custom { description } if !description.is_empty() => description.clone(),
            _ => "Custom module".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_every_builtin_type() {
        let table = default_render_table();
        let modules = [
            ModuleKind::Player,
            ModuleKind::PostCreator,
            ModuleKind::GroupManager,
            ModuleKind::GroupInfo { group_id: None },
            ModuleKind::PageSpecific {
                page_type: "profile".into(),
            },
            ModuleKind::QueueManager,
            ModuleKind::Custom {
                description: String::new(),
            },
        ];
        for kind in modules {
            let module = SidebarModule::new("m", "M", kind, 1);
            assert!(table.render(&module).is_some(), "{:?}", module.module_type());
        }
    }

    #[test]
    fn strategy_sees_kind_payload() {
        let table = default_render_table();
        let module = SidebarModule::new(
            "group-info-7",
            "Group",
            ModuleKind::GroupInfo { group_id: Some(7) },
            0,
        );
        assert_eq!(
            table.render(&module).as_deref(),
            Some("Loading information for group 7...")
        );

        let custom = SidebarModule::new(
            "c",
            "Notes",
            ModuleKind::Custom {
                description: "Pinned notes".into(),
            },
            5,
        );
        assert_eq!(table.render(&custom).as_deref(), Some("Pinned notes"));
    }

    #[test]
    fn missing_strategy_renders_nothing() {
        let table = RenderTable::empty();
        let module = SidebarModule::new("p", "Player", ModuleKind::Player, 1);
        assert_eq!(table.render(&module), None);
    }

    #[test]
    fn registered_strategy_replaces_default() {
        let table = default_render_table().with(ModuleType::Player, |m: &SidebarModule| {
            format!("[{}]", m.title)
        });
        let module = SidebarModule::new("p", "Player", ModuleKind::Player, 1);
        assert_eq!(table.render(&module).as_deref(), Some("[Player]"));
    }
}
