//! Project cache and synchronization with Asana.
//!
//! [`Synchronizer`] is the only owner of cached projects. Consumers call
//! [`Synchronizer::fetch`] and get a [`CacheEntry`] back: a copy of the
//! project plus a staleness flag they can turn into a warning.
//!
//! ## Staleness
//!
//! An entry is stale once its age reaches [`SyncSettings::stale_after`]
//! (five minutes by default) or after [`Synchronizer::invalidate`]. Stale
//! entries are refetched on the next `fetch`; if Asana cannot be reached the
//! stale copy is served instead, flagged as such.

mod entry;
mod synchronizer;

pub use entry::{CacheEntry, Origin, format_age};
pub use synchronizer::{SyncSettings, Synchronizer};
