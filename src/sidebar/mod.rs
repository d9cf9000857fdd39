//! Reconfigurable sidebar modules.
//!
//! The sidebar is a list of modules (player, play queue, post creator, group
//! info, ...) the user can show, hide, reorder, add and remove. The pieces:
//!
//! - [`module`]: plain, serializable module records; the `type` tag selects
//!   the kind and its payload.
//! - [`store`]: the [`ModuleStore`] persistence trait with in-memory and JSON
//!   file backends.
//! - [`registry`]: [`ModuleRegistry`], the in-memory copy with write-through
//!   persistence and change subscribers.
//! - [`render`]: the `type → strategy` side table used at display time.

pub mod module;
pub mod registry;
pub mod render;
pub mod store;

pub use module::{ModuleKind, ModulePatch, ModuleType, SidebarModule, default_modules};
pub use registry::{ModuleRegistry, RegistryError};
pub use render::{RenderStrategy, RenderTable, default_render_table};
pub use store::{JsonFileStore, MemoryStore, ModuleStore, StoreError};
