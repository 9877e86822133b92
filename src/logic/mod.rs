//! Core non-UI list logic split into modular submodules.

pub mod filter;
pub mod merge;
pub mod reducer;
pub mod sort;
pub mod view;

pub use filter::filter_by_name;
pub use merge::merge_catalog;
pub use reducer::{AppUpdate, apply_update};
pub use sort::sort_by_name;
pub use view::derive_view;
