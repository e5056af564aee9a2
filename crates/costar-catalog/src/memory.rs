//! In-memory catalog: a fixed actor/movie graph.
//!
//! Credit insertion order defines both filmography order (per actor) and cast
//! order (per movie), which in turn decides which of several equally short
//! paths a search reports.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use costar_core::config::CatalogConfig;
use costar_core::constants::{DEFAULT_MAX_CAST, DEFAULT_MAX_MOVIES};
use costar_core::errors::{CatalogError, CostarResult};
use costar_core::{ActorRef, IDataSource, MovieRef};

use crate::normalize::{normalize_cast, normalize_movies};

/// One actor appearing in one movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub movie_id: String,
    pub actor_id: String,
}

/// Serializable form of an [`InMemoryCatalog`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub actors: Vec<ActorRef>,
    #[serde(default)]
    pub movies: Vec<MovieRef>,
    #[serde(default)]
    pub credits: Vec<Credit>,
}

#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    actors: Vec<ActorRef>,
    actor_index: HashMap<String, usize>,
    movies: Vec<MovieRef>,
    movie_index: HashMap<String, usize>,
    credits: Vec<Credit>,
    filmographies: HashMap<String, Vec<String>>,
    casts: HashMap<String, Vec<String>>,
    max_movies: usize,
    max_cast: usize,
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            actors: Vec::new(),
            actor_index: HashMap::new(),
            movies: Vec::new(),
            movie_index: HashMap::new(),
            credits: Vec::new(),
            filmographies: HashMap::new(),
            casts: HashMap::new(),
            max_movies: DEFAULT_MAX_MOVIES,
            max_cast: DEFAULT_MAX_CAST,
        }
    }

    /// Override the per-lookup caps.
    pub fn with_caps(mut self, max_movies: usize, max_cast: usize) -> Self {
        self.max_movies = max_movies;
        self.max_cast = max_cast;
        self
    }

    /// Apply the caps from catalog config.
    pub fn with_config(self, config: &CatalogConfig) -> Self {
        let (movies, cast) = (config.effective_max_movies(), config.effective_max_cast());
        self.with_caps(movies, cast)
    }

    /// Add or rename an actor.
    pub fn add_actor(&mut self, id: impl Into<String>, name: impl Into<String>) -> &mut Self {
        let actor = ActorRef::new(id, name);
        match self.actor_index.get(&actor.id) {
            Some(&i) => self.actors[i] = actor,
            None => {
                self.actor_index.insert(actor.id.clone(), self.actors.len());
                self.actors.push(actor);
            }
        }
        self
    }

    /// Add or retitle a movie.
    pub fn add_movie(&mut self, id: impl Into<String>, title: impl Into<String>) -> &mut Self {
        let movie = MovieRef::new(id, title);
        match self.movie_index.get(&movie.id) {
            Some(&i) => self.movies[i] = movie,
            None => {
                self.movie_index.insert(movie.id.clone(), self.movies.len());
                self.movies.push(movie);
            }
        }
        self
    }

    /// Record that `actor_id` appears in `movie_id`. Either may be added
    /// later; credits naming unknown ids are ignored by lookups.
    pub fn add_credit(&mut self, movie_id: impl Into<String>, actor_id: impl Into<String>) -> &mut Self {
        let credit = Credit {
            movie_id: movie_id.into(),
            actor_id: actor_id.into(),
        };
        self.filmographies
            .entry(credit.actor_id.clone())
            .or_default()
            .push(credit.movie_id.clone());
        self.casts
            .entry(credit.movie_id.clone())
            .or_default()
            .push(credit.actor_id.clone());
        self.credits.push(credit);
        self
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    pub fn actor(&self, id: &str) -> Option<&ActorRef> {
        self.actor_index.get(id).map(|&i| &self.actors[i])
    }

    pub fn movie(&self, id: &str) -> Option<&MovieRef> {
        self.movie_index.get(id).map(|&i| &self.movies[i])
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        let mut catalog = Self::new();
        for actor in snapshot.actors {
            catalog.add_actor(actor.id, actor.name);
        }
        for movie in snapshot.movies {
            catalog.add_movie(movie.id, movie.title);
        }
        for credit in snapshot.credits {
            catalog.add_credit(credit.movie_id, credit.actor_id);
        }
        catalog
    }

    pub fn to_snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            actors: self.actors.clone(),
            movies: self.movies.clone(),
            credits: self.credits.clone(),
        }
    }

    /// Load a JSON snapshot from disk.
    pub fn from_snapshot_file(path: &Path) -> CostarResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let snapshot: CatalogSnapshot =
            serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
                url: path.display().to_string(),
                what: format!("catalog snapshot ({e})"),
            })?;
        debug!(
            path = %path.display(),
            actors = snapshot.actors.len(),
            movies = snapshot.movies.len(),
            credits = snapshot.credits.len(),
            "catalog snapshot loaded"
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Write the catalog as a pretty-printed JSON snapshot.
    pub fn write_snapshot_file(&self, path: &Path) -> CostarResult<()> {
        let json = serde_json::to_string_pretty(&self.to_snapshot())?;
        std::fs::write(path, json).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

impl IDataSource for InMemoryCatalog {
    fn resolve_actor(&self, name: &str) -> CostarResult<Option<ActorRef>> {
        let wanted = name.trim();
        let exact = self.actors.iter().find(|a| a.name == wanted);
        let found = exact.or_else(|| {
            let folded = wanted.to_lowercase();
            self.actors
                .iter()
                .find(|a| a.name.trim().to_lowercase() == folded)
        });
        Ok(found.cloned())
    }

    fn list_movies(&self, actor: &ActorRef) -> CostarResult<Vec<MovieRef>> {
        let Some(ids) = self.filmographies.get(&actor.id) else {
            return Ok(Vec::new());
        };
        let movies = ids.iter().filter_map(|id| self.movie(id).cloned());
        Ok(normalize_movies(movies, self.max_movies))
    }

    fn list_cast(&self, movie: &MovieRef) -> CostarResult<Vec<ActorRef>> {
        let Some(ids) = self.casts.get(&movie.id) else {
            return Ok(Vec::new());
        };
        let cast = ids.iter().filter_map(|id| self.actor(id).cloned());
        Ok(normalize_cast(cast, self.max_cast))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InMemoryCatalog {
        let mut c = InMemoryCatalog::new();
        c.add_actor("nm1", "Al Pacino")
            .add_actor("nm2", "Robert De Niro")
            .add_movie("tt1", "Heat")
            .add_credit("tt1", "nm1")
            .add_credit("tt1", "nm2");
        c
    }

    #[test]
    fn resolves_exact_then_case_insensitive() {
        let c = sample();
        assert_eq!(c.resolve_actor("Al Pacino").unwrap().unwrap().id, "nm1");
        assert_eq!(c.resolve_actor("  al pacino ").unwrap().unwrap().id, "nm1");
        assert!(c.resolve_actor("Val Kilmer").unwrap().is_none());
    }

    #[test]
    fn unknown_ids_yield_empty_lists() {
        let c = sample();
        assert!(c.list_movies(&ActorRef::new("nm9", "Nobody")).unwrap().is_empty());
        assert!(c.list_cast(&MovieRef::new("tt9", "Nothing")).unwrap().is_empty());
    }

    #[test]
    fn credits_to_unknown_actors_are_skipped() {
        let mut c = sample();
        c.add_credit("tt1", "nm404");
        let cast = c.list_cast(&MovieRef::new("tt1", "Heat")).unwrap();
        assert_eq!(cast.len(), 2);
    }

    #[test]
    fn re_adding_an_actor_renames_in_place() {
        let mut c = sample();
        c.add_actor("nm1", "Alfredo Pacino");
        assert_eq!(c.actor_count(), 2);
        assert_eq!(c.actor("nm1").unwrap().name, "Alfredo Pacino");
    }
}
