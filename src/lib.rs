//! # photowall
//!
//! Layout and state plumbing for a photo wall: a brick-laid grid of photos
//! with mixed aspect ratios, an infinite-scroll pagination driver, and a
//! reconfigurable sidebar.
//!
//! # Data Flow
//!
//! ```text
//! photos/  ──scan──▶  photos.json  ──resolve ratios──▶  pack  ──▶  positioned tiles
//!                          │
//!                          └──▶  Paginator (page by page)  ──▶  growing list
//! ```
//!
//! Photos arrive with uneven metadata. [`ratio`] turns each record into an
//! aspect ratio, never failing. [`grid`] tiles those ratios into full-width
//! rows whose overall shape is as close as possible to a target ratio.
//! [`paginate`] feeds the list one page at a time and guards against late
//! responses after a reset.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Photo records and backend list responses |
//! | [`ratio`] | Prioritized aspect-ratio resolution from photo metadata |
//! | [`grid`] | Brick-layout packer: single, pair and searched multi-row layouts |
//! | [`paginate`] | Sans-IO infinite-scroll driver with stale-response protection |
//! | [`sidebar`] | Sidebar module records, persistence, registry and rendering table |
//! | [`scan`] | Directory scanning into photo listings, with optional dimension probing |
//! | [`imaging`] | Image header probing via the `image` crate |
//! | [`config`] | Layered `photowall.toml` loading, validation and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Layout Never Fails
//!
//! The packer takes ratios and a width and always returns one tile per photo.
//! Missing metadata falls back to 4:3; an unusable container width yields
//! zero-size tiles. Callers never handle layout errors.
//!
//! ## Pure Packing
//!
//! [`grid::pack_ratios`] has no I/O and no shared state, so several container
//! widths can be laid out in parallel ([`grid::pack_responsive`]).
//!
//! ## Data-Only Sidebar Modules
//!
//! Module records hold no rendering logic. How a module looks is looked up by
//! type in a [`sidebar::RenderTable`] at display time, so records persist as
//! plain JSON.

pub mod config;
pub mod grid;
pub mod imaging;
pub mod output;
pub mod paginate;
pub mod ratio;
pub mod scan;
pub mod sidebar;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
