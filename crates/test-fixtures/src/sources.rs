//! Instrumented data sources wrapping a real one.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use costar_core::errors::{CatalogError, CostarResult};
use costar_core::{ActorRef, IDataSource, MovieRef};

/// Counts calls per operation.
#[derive(Debug, Default)]
pub struct CallCounts {
    pub resolve: AtomicUsize,
    pub movies: AtomicUsize,
    pub cast: AtomicUsize,
}

pub struct CountingSource<S> {
    inner: S,
    counts: CallCounts,
}

impl<S: IDataSource> CountingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            counts: CallCounts::default(),
        }
    }

    pub fn resolve_calls(&self) -> usize {
        self.counts.resolve.load(Ordering::SeqCst)
    }

    pub fn movie_calls(&self) -> usize {
        self.counts.movies.load(Ordering::SeqCst)
    }

    pub fn cast_calls(&self) -> usize {
        self.counts.cast.load(Ordering::SeqCst)
    }
}

impl<S: IDataSource> IDataSource for CountingSource<S> {
    fn resolve_actor(&self, name: &str) -> CostarResult<Option<ActorRef>> {
        self.counts.resolve.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve_actor(name)
    }

    fn list_movies(&self, actor: &ActorRef) -> CostarResult<Vec<MovieRef>> {
        self.counts.movies.fetch_add(1, Ordering::SeqCst);
        self.inner.list_movies(actor)
    }

    fn list_cast(&self, movie: &MovieRef) -> CostarResult<Vec<ActorRef>> {
        self.counts.cast.fetch_add(1, Ordering::SeqCst);
        self.inner.list_cast(movie)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Fails selected lookups with a 503, as an overloaded catalog would.
pub struct FlakySource<S> {
    inner: S,
    failing_names: HashSet<String>,
    failing_actors: HashSet<String>,
    failing_movies: HashSet<String>,
}

impl<S: IDataSource> FlakySource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            failing_names: HashSet::new(),
            failing_actors: HashSet::new(),
            failing_movies: HashSet::new(),
        }
    }

    /// Name lookups for `name` fail.
    pub fn fail_resolve(mut self, name: &str) -> Self {
        self.failing_names.insert(name.to_string());
        self
    }

    /// Filmography lookups for `actor_id` fail.
    pub fn fail_movies(mut self, actor_id: &str) -> Self {
        self.failing_actors.insert(actor_id.to_string());
        self
    }

    /// Cast lookups for `movie_id` fail.
    pub fn fail_cast(mut self, movie_id: &str) -> Self {
        self.failing_movies.insert(movie_id.to_string());
        self
    }

    fn unavailable(key: &str) -> costar_core::CostarError {
        CatalogError::HttpStatus {
            url: format!("memory://{key}"),
            status: 503,
        }
        .into()
    }
}

impl<S: IDataSource> IDataSource for FlakySource<S> {
    fn resolve_actor(&self, name: &str) -> CostarResult<Option<ActorRef>> {
        if self.failing_names.contains(name) {
            return Err(Self::unavailable(name));
        }
        self.inner.resolve_actor(name)
    }

    fn list_movies(&self, actor: &ActorRef) -> CostarResult<Vec<MovieRef>> {
        if self.failing_actors.contains(&actor.id) {
            return Err(Self::unavailable(&actor.id));
        }
        self.inner.list_movies(actor)
    }

    fn list_cast(&self, movie: &MovieRef) -> CostarResult<Vec<ActorRef>> {
        if self.failing_movies.contains(&movie.id) {
            return Err(Self::unavailable(&movie.id));
        }
        self.inner.list_cast(movie)
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

/// Sleeps before every list lookup, or only before the cast lookup of one
/// movie.
pub struct SlowSource<S> {
    inner: S,
    delay: Duration,
    only_cast_of: Option<String>,
}

impl<S: IDataSource> SlowSource<S> {
    pub fn new(inner: S, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            only_cast_of: None,
        }
    }

    /// Delay nothing but the cast of `movie_id`.
    pub fn only_cast_of(mut self, movie_id: &str) -> Self {
        self.only_cast_of = Some(movie_id.to_string());
        self
    }
}

impl<S: IDataSource> IDataSource for SlowSource<S> {
    fn resolve_actor(&self, name: &str) -> CostarResult<Option<ActorRef>> {
        self.inner.resolve_actor(name)
    }

    fn list_movies(&self, actor: &ActorRef) -> CostarResult<Vec<MovieRef>> {
        if self.only_cast_of.is_none() {
            std::thread::sleep(self.delay);
        }
        self.inner.list_movies(actor)
    }

    fn list_cast(&self, movie: &MovieRef) -> CostarResult<Vec<ActorRef>> {
        if self.only_cast_of.as_ref().map_or(true, |id| *id == movie.id) {
            std::thread::sleep(self.delay);
        }
        self.inner.list_cast(movie)
    }

    fn name(&self) -> &str {
        "slow"
    }
}
