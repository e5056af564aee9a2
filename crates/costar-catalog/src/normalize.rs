//! Shape raw catalog sequences into what the search engine expects: trimmed,
//! de-duplicated by id in first-seen order, capped.
//!
//! Scraped pages also carry link noise (years, ratings, initials). The
//! `scraped_*` variants drop that before normalizing; curated sources use the
//! plain variants and keep every non-empty record.

use std::collections::HashSet;

use costar_core::{ActorRef, MovieRef};

/// Whether a trimmed movie title is worth keeping. Single characters and
/// bare numbers (years, ratings, episode counts) are link noise.
pub fn is_meaningful_title(title: &str) -> bool {
    let title = title.trim();
    title.chars().count() > 1 && !title.chars().all(|c| c.is_ascii_digit())
}

/// Whether a scraped actor name is worth keeping.
pub fn is_meaningful_name(name: &str) -> bool {
    name.trim().chars().count() > 1
}

pub fn normalize_movies(movies: impl IntoIterator<Item = MovieRef>, cap: usize) -> Vec<MovieRef> {
    let mut seen = HashSet::new();
    movies
        .into_iter()
        .filter_map(|mut movie| {
            movie.title = movie.title.trim().to_string();
            (!movie.title.is_empty()).then_some(movie)
        })
        .filter(|movie| seen.insert(movie.id.clone()))
        .take(cap)
        .collect()
}

pub fn normalize_cast(cast: impl IntoIterator<Item = ActorRef>, cap: usize) -> Vec<ActorRef> {
    let mut seen = HashSet::new();
    cast.into_iter()
        .filter_map(|mut actor| {
            actor.name = actor.name.trim().to_string();
            (!actor.name.is_empty()).then_some(actor)
        })
        .filter(|actor| seen.insert(actor.id.clone()))
        .take(cap)
        .collect()
}

/// [`normalize_movies`] after dropping titles that fail [`is_meaningful_title`].
pub fn scraped_movies(movies: impl IntoIterator<Item = MovieRef>, cap: usize) -> Vec<MovieRef> {
    normalize_movies(
        movies.into_iter().filter(|m| is_meaningful_title(&m.title)),
        cap,
    )
}

/// [`normalize_cast`] after dropping names that fail [`is_meaningful_name`].
pub fn scraped_cast(cast: impl IntoIterator<Item = ActorRef>, cap: usize) -> Vec<ActorRef> {
    normalize_cast(
        cast.into_iter().filter(|a| is_meaningful_name(&a.name)),
        cap,
    )
}
