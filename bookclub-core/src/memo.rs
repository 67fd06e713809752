//! Memoized external fetch
//!
//! Book materialization and summary generation share one shape: look in a
//! local store, otherwise fetch from a provider, keep what was fetched, and
//! return it. [`Memoized`] names the three steps and [`memoized`] runs them.

use async_trait::async_trait;

/// Outcome of the fetch step
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<V> {
    /// A real value that should be stored before it is returned
    Fresh(V),

    /// A stand-in value returned as-is and never stored, so the next call
    /// tries the provider again
    Transient(V),

    /// Nothing to return
    Missing,
}

/// The three steps of a memoized fetch
#[async_trait]
pub trait Memoized: Send + Sync {
    type Key: ?Sized + Sync;
    type Value: Send;
    type Error: Send;

    /// Read from the local store
    async fn lookup(&self, key: &Self::Key) -> Result<Option<Self::Value>, Self::Error>;

    /// Produce a value from the provider after a lookup miss
    async fn fetch(&self, key: &Self::Key) -> Result<Fetched<Self::Value>, Self::Error>;

    /// Keep a fresh value; returns the value that ended up stored, which may
    /// be a concurrent writer's
    async fn store(&self, key: &Self::Key, value: Self::Value)
        -> Result<Self::Value, Self::Error>;
}

/// Run lookup, then fetch and store on a miss
pub async fn memoized<M>(source: &M, key: &M::Key) -> Result<Option<M::Value>, M::Error>
where
    M: Memoized + ?Sized,
{
    if let Some(hit) = source.lookup(key).await? {
        return Ok(Some(hit));
    }

    match source.fetch(key).await? {
        Fetched::Fresh(value) => source.store(key, value).await.map(Some),
        Fetched::Transient(value) => Ok(Some(value)),
        Fetched::Missing => Ok(None),
    }
}
