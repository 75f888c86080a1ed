use crate::domain::{Endpoint, Fix};
use crate::store::key_value::{KeyValueStore, StoreError};
use tracing::{info, instrument};

/// Last known fix per gpsd endpoint.
#[derive(Debug)]
pub struct LastFixStore<S> {
    inner: S,
}

impl<S: KeyValueStore> LastFixStore<S> {
    pub fn new(inner: S) -> Self {
        LastFixStore { inner }
    }

    #[instrument(skip_all, fields(endpoint = %endpoint))]
    pub async fn put(&self, endpoint: &Endpoint, fix: &Fix) -> Result<(), StoreError> {
        self.inner.put(&endpoint.store_key(), &fix.to_string()).await?;
        info!("💾 Saved last known fix for {}", endpoint);
        Ok(())
    }

    /// The stored record, verbatim.
    #[instrument(skip_all, fields(endpoint = %endpoint))]
    pub async fn get(&self, endpoint: &Endpoint) -> Result<Option<String>, StoreError> {
        self.inner.get(&endpoint.store_key()).await
    }
}
