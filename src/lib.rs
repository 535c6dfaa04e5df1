//! Hostess - manage a block of toggleable hosts file entries and saved profiles.

pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod platform;
pub mod profile;
pub mod region;
pub mod store;

pub use entry::Entry;
pub use error::{HostessError, Result};
pub use profile::ProfileStore;
pub use region::{RegionDocument, RegionStore};
