//! Memoizing wrapper around any data source, using moka.
//!
//! Three independent caches: name → actor, actor id → filmography, movie id
//! → cast. Only successful lookups are stored, so a miss or a failed fetch is
//! retried on the next request. Safe to share across concurrent searches.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use moka::sync::Cache;
use serde::Serialize;
use tracing::trace;

use costar_core::config::CacheConfig;
use costar_core::errors::CostarResult;
use costar_core::{ActorRef, IDataSource, MovieRef};

/// Cache occupancy and effectiveness counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub actor_entries: u64,
    pub filmography_entries: u64,
    pub cast_entries: u64,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

pub struct CachedDataSource<S> {
    inner: S,
    actors: Cache<String, ActorRef>,
    filmographies: Cache<String, Arc<Vec<MovieRef>>>,
    casts: Cache<String, Arc<Vec<ActorRef>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<S: IDataSource> CachedDataSource<S> {
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let ttl = config.ttl();
        Self {
            inner,
            actors: Cache::builder()
                .max_capacity(config.effective_max_actors())
                .time_to_live(ttl)
                .build(),
            filmographies: Cache::builder()
                .max_capacity(config.effective_max_filmographies())
                .time_to_live(ttl)
                .build(),
            casts: Cache::builder()
                .max_capacity(config.effective_max_casts())
                .time_to_live(ttl)
                .build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn stats(&self) -> CacheStats {
        self.actors.run_pending_tasks();
        self.filmographies.run_pending_tasks();
        self.casts.run_pending_tasks();
        CacheStats {
            actor_entries: self.actors.entry_count(),
            filmography_entries: self.filmographies.entry_count(),
            cast_entries: self.casts.entry_count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Invalidate every entry. Counters are kept.
    pub fn clear(&self) {
        self.actors.invalidate_all();
        self.filmographies.invalidate_all();
        self.casts.invalidate_all();
    }

    fn record<T>(&self, cached: Option<T>) -> Option<T> {
        let counter = if cached.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        cached
    }
}

impl<S: IDataSource> IDataSource for CachedDataSource<S> {
    fn resolve_actor(&self, name: &str) -> CostarResult<Option<ActorRef>> {
        let key = name.trim().to_string();
        if let Some(actor) = self.record(self.actors.get(&key)) {
            trace!(name = %key, "actor cache hit");
            return Ok(Some(actor));
        }
        let resolved = self.inner.resolve_actor(name)?;
        if let Some(actor) = &resolved {
            self.actors.insert(key, actor.clone());
        }
        Ok(resolved)
    }

    fn list_movies(&self, actor: &ActorRef) -> CostarResult<Vec<MovieRef>> {
        if let Some(movies) = self.record(self.filmographies.get(&actor.id)) {
            trace!(actor_id = %actor.id, "filmography cache hit");
            return Ok(movies.as_ref().clone());
        }
        let movies = self.inner.list_movies(actor)?;
        self.filmographies
            .insert(actor.id.clone(), Arc::new(movies.clone()));
        Ok(movies)
    }

    fn list_cast(&self, movie: &MovieRef) -> CostarResult<Vec<ActorRef>> {
        if let Some(cast) = self.record(self.casts.get(&movie.id)) {
            trace!(movie_id = %movie.id, "cast cache hit");
            return Ok(cast.as_ref().clone());
        }
        let cast = self.inner.list_cast(movie)?;
        self.casts.insert(movie.id.clone(), Arc::new(cast.clone()));
        Ok(cast)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
