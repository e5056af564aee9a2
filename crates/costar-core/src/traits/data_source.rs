use crate::errors::CostarResult;
use crate::models::{ActorRef, MovieRef};

/// Catalog lookups consumed by the search engine.
///
/// Implementations own any caching and internal locking. Sequences come back
/// in catalog order; that order decides which of several equally short paths
/// the engine reports. Movie lists are capped, de-duplicated by id, and free
/// of empty titles; cast lists are capped and de-duplicated by id.
pub trait IDataSource: Send + Sync {
    /// Resolve a human-readable name. `Ok(None)` when the catalog has no match.
    fn resolve_actor(&self, name: &str) -> CostarResult<Option<ActorRef>>;

    /// The actor's filmography.
    fn list_movies(&self, actor: &ActorRef) -> CostarResult<Vec<MovieRef>>;

    /// The movie's credited cast.
    fn list_cast(&self, movie: &MovieRef) -> CostarResult<Vec<ActorRef>>;

    /// Human-readable source name for logs.
    fn name(&self) -> &str;
}

impl<T: IDataSource + ?Sized> IDataSource for std::sync::Arc<T> {
    fn resolve_actor(&self, name: &str) -> CostarResult<Option<ActorRef>> {
        (**self).resolve_actor(name)
    }

    fn list_movies(&self, actor: &ActorRef) -> CostarResult<Vec<MovieRef>> {
        (**self).list_movies(actor)
    }

    fn list_cast(&self, movie: &MovieRef) -> CostarResult<Vec<ActorRef>> {
        (**self).list_cast(movie)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
