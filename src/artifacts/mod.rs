//! Fitted artifact loading and process-wide caching.
//!
//! Artifacts load at most once per process through [`shared`] and are
//! read-only afterwards, so the store is safe to hand out across threads.

use std::path::Path;
use std::sync::OnceLock;

use crate::error::AppError;

pub mod store;

pub use store::ArtifactStore;

static STORE: OnceLock<ArtifactStore> = OnceLock::new();

/// Load the artifact store from `dir`, or return the already-loaded one.
///
/// A single invocation only ever uses one artifact directory, so the first
/// successful load wins and later calls reuse it.
pub fn shared(dir: &Path) -> Result<&'static ArtifactStore, AppError> {
    if let Some(store) = STORE.get() {
        return Ok(store);
    }
    let store = ArtifactStore::load(dir)?;
    Ok(STORE.get_or_init(|| store))
}
