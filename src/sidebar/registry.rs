//! In-memory module registry over a pluggable store.
//!
//! [`ModuleRegistry`] holds the current module list, writes it through to its
//! [`ModuleStore`] after every change, and notifies subscribers with the new
//! list. Opening a registry whose store is empty, or whose saved data cannot
//! be read, starts from [`default_modules`].

use super::module::{ModuleKind, ModulePatch, ModuleType, SidebarModule, default_modules};
use super::store::{ModuleStore, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("No module with id {0}")]
    NotFound(String),
    #[error("Module position {index} out of range (have {len})")]
    OutOfRange { index: usize, len: usize },
}

type Listener = Box<dyn Fn(&[SidebarModule]) + Send + Sync>;

/// Sidebar modules with write-through persistence.
pub struct ModuleRegistry<S: ModuleStore> {
    modules: Vec<SidebarModule>,
    store: S,
    listeners: Vec<Listener>,
}

impl<S: ModuleStore> std::fmt::Debug for ModuleRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.modules)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<S: ModuleStore> ModuleRegistry<S> {
    /// Load modules from `store`, falling back to defaults.
    ///
    /// Unreadable saved data is logged and replaced by the defaults on the
    /// next save; it is not an error.
    pub fn open(store: S) -> Self {
        let modules = match store.load() {
            Ok(Some(modules)) => modules,
            Ok(None) => default_modules(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load sidebar modules, using defaults");
                default_modules()
            }
        };
        Self {
            modules,
            store,
            listeners: Vec::new(),
        }
    }

    /// All modules in storage order.
    pub fn modules(&self) -> &[SidebarModule] {
        &self.modules
    }

    pub fn get(&self, id: &str) -> Option<&SidebarModule> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Call `listener` with the module list after every change.
    pub fn subscribe(&mut self, listener: impl Fn(&[SidebarModule]) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Append a module. An order of 0 means "after everything else".
    pub fn add(&mut self, mut module: SidebarModule) -> Result<(), RegistryError> {
        if module.order == 0 {
            module.order = self.modules.len() as u32 + 1;
        }
        self.modules.push(module);
        self.commit()
    }

    pub fn remove(&mut self, id: &str) -> Result<(), RegistryError> {
        let before = self.modules.len();
        self.modules.retain(|m| m.id != id);
        if self.modules.len() == before {
            return Err(RegistryError::NotFound(id.to_string()));
        }
        self.commit()
    }

    pub fn update(&mut self, id: &str, patch: ModulePatch) -> Result<(), RegistryError> {
        let module = self.find_mut(id)?;
        patch.apply(module);
        self.commit()
    }

    pub fn toggle_visibility(&mut self, id: &str) -> Result<(), RegistryError> {
        let module = self.find_mut(id)?;
        module.is_visible = !module.is_visible;
        self.commit()
    }

    /// Move the module at position `from` to position `to`, then renumber
    /// every module's order as 1..=n.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), RegistryError> {
        let len = self.modules.len();
        for index in [from, to] {
            if index >= len {
                return Err(RegistryError::OutOfRange { index, len });
            }
        }
        let module = self.modules.remove(from);
        self.modules.insert(to, module);
        self.renumber();
        self.commit()
    }

    /// Visible modules in display order.
    ///
    /// Page-specific modules come before global ones; within each group
    /// modules are sorted by `order`.
    pub fn visible_modules(&self) -> Vec<&SidebarModule> {
        let mut visible: Vec<&SidebarModule> =
            self.modules.iter().filter(|m| m.is_visible).collect();
        visible.sort_by_key(|m| (!m.is_page_specific, m.order));
        visible
    }

    pub fn has_group_info(&self) -> bool {
        self.modules
            .iter()
            .any(|m| m.module_type() == ModuleType::GroupInfo)
    }

    /// Show the info module for `group_id` at the top of the sidebar.
    ///
    /// Any existing group-info module is replaced. Every other module's
    /// order moves down by one. Returns the new module's id.
    pub fn add_group_info(&mut self, group_id: u64) -> Result<String, RegistryError> {
        let id = format!("group-info-{group_id}");
        self.modules
            .retain(|m| m.module_type() != ModuleType::GroupInfo);
        for module in &mut self.modules {
            module.order += 1;
        }

        let module = SidebarModule {
            is_page_specific: true,
            page_id: Some(format!("group-{group_id}")),
            ..SidebarModule::new(
                id.clone(),
                "Group information",
                ModuleKind::GroupInfo {
                    group_id: Some(group_id),
                },
                0,
            )
        };
        self.modules.insert(0, module);
        self.commit()?;
        Ok(id)
    }

    /// Drop the group-info module and renumber the rest as 1..=n.
    pub fn remove_group_info(&mut self) -> Result<(), RegistryError> {
        self.modules
            .retain(|m| m.module_type() != ModuleType::GroupInfo);
        self.renumber();
        self.commit()
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut SidebarModule, RegistryError> {
        self.modules
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    fn renumber(&mut self) {
        for (index, module) in self.modules.iter_mut().enumerate() {
            module.order = index as u32 + 1;
        }
    }

    /// Persist and notify. The in-memory list stays updated even if the
    /// store fails.
    fn commit(&mut self) -> Result<(), RegistryError> {
        for listener in &self.listeners {
            listener(&self.modules);
        }
        self.store.save(&self.modules)?;
        Ok(())
    }
}
