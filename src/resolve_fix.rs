use crate::domain::{Endpoint, Fix};
use crate::gpsd::ReaderError;
use crate::store::{KeyValueStore, LastFixStore, StoreError};
use tracing::{info, instrument, warn};

/// Turns the outcome of a live read into the line to print, if any.
///
/// A fix with a latitude is saved and returned. Anything else falls back to the last saved record; when there is none,
/// a fix without position is still reported as sentinels while a failed read yields nothing.
#[instrument(skip_all, fields(endpoint = %endpoint))]
pub async fn resolve_fix<S: KeyValueStore>(
    reading: Result<Fix, ReaderError>,
    store: &LastFixStore<S>,
    endpoint: &Endpoint,
) -> Result<Option<String>, StoreError> {
    let fallback = match reading {
        Ok(fix) if fix.has_position() => {
            store.put(endpoint, &fix).await?;
            return Ok(Some(fix.to_string()));
        }
        Ok(fix) => {
            info!("🛰️ {} has no fix, using last known fix", endpoint);
            Some(fix.to_string())
        }
        Err(e) if e.is_timeout() => {
            warn!("⏳ {} from {}. Using last known fix", e, endpoint);
            None
        }
        Err(e) => {
            warn!("⚠️ Could not read a fix from {}: {}. Using last known fix", endpoint, e);
            None
        }
    };

    match store.get(endpoint).await? {
        Some(record) => Ok(Some(record)),
        None => {
            info!("💾 No last known fix for {}", endpoint);
            Ok(fallback)
        }
    }
}
