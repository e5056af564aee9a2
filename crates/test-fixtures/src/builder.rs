//! Compact graph construction for tests: actors are named by their id.

use costar_catalog::InMemoryCatalog;

/// Builds an [`InMemoryCatalog`] movie by movie.
///
/// ```
/// use test_fixtures::CatalogBuilder;
///
/// let catalog = CatalogBuilder::new()
///     .movie("m1", &["A", "B"])
///     .movie("m2", &["B", "C"])
///     .build();
/// assert_eq!(catalog.actor_count(), 3);
/// ```
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: InMemoryCatalog,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A movie titled after its id, credited to `cast` in order.
    pub fn movie(self, id: &str, cast: &[&str]) -> Self {
        self.titled_movie(id, id, cast)
    }

    pub fn titled_movie(mut self, id: &str, title: &str, cast: &[&str]) -> Self {
        self.catalog.add_movie(id, title);
        for actor in cast {
            if self.catalog.actor(actor).is_none() {
                self.catalog.add_actor(*actor, *actor);
            }
            self.catalog.add_credit(id, *actor);
        }
        self
    }

    /// An actor with no credits.
    pub fn actor(mut self, id: &str) -> Self {
        self.catalog.add_actor(id, id);
        self
    }

    /// A straight chain `a0 - m0 - a1 - m1 - ... - a{len}`.
    pub fn chain(mut self, prefix: &str, len: usize) -> Self {
        for i in 0..len {
            let from = format!("{prefix}{i}");
            let to = format!("{prefix}{}", i + 1);
            let movie = format!("{prefix}-movie-{i}");
            self = self.movie(&movie, &[from.as_str(), to.as_str()]);
        }
        self
    }

    pub fn caps(mut self, max_movies: usize, max_cast: usize) -> Self {
        self.catalog = self.catalog.with_caps(max_movies, max_cast);
        self
    }

    pub fn build(self) -> InMemoryCatalog {
        self.catalog
    }
}
