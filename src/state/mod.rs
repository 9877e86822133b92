//! State value types for the marketplace list.

pub mod types;

pub use types::{
    AppRecord, AppStatusInfo, InstalledApp, ListView, MarketplaceApp, SortDirection, SortField,
    SortSpec, ViewQuery,
};
