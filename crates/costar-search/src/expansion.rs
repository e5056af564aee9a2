//! Expanding one BFS level: actor → movies → cast → next-level entries.

use rayon::prelude::*;
use tracing::{debug, warn};

use costar_core::{ActorRef, ConnectionPath, Hop, IDataSource, MovieRef, ProgressEvent, SearchPhase};

use crate::frontier::{Frontier, FrontierEntry};
use crate::outcome::SearchStats;
use crate::progress::{entry_percent, movie_percent, ProgressReporter};
use crate::stop::{Interrupt, StopSignal};

/// Everything a worker needs to expand entries of one level.
pub(crate) struct LevelContext<'a> {
    pub source: &'a dyn IDataSource,
    pub target_id: &'a str,
    pub frontier: &'a Frontier,
    pub reporter: &'a ProgressReporter<'a>,
    pub stop: &'a StopSignal,
    pub depth: usize,
    pub max_depth: usize,
    pub level_len: usize,
}

/// Result of expanding a whole level.
#[derive(Debug, Default)]
pub(crate) struct LevelResult {
    pub found: Option<ConnectionPath>,
    /// Next-level entries in traversal order.
    pub discovered: Vec<FrontierEntry>,
    pub interrupted: Option<Interrupt>,
    pub stats: SearchStats,
}

/// One entry's expansion. Co-stars are buffered in scan order; whether each is
/// a new discovery is decided when results are merged in entry order.
#[derive(Debug, Default)]
struct EntryResult {
    found: Option<ConnectionPath>,
    candidates: Vec<FrontierEntry>,
    interrupted: Option<Interrupt>,
    stats: SearchStats,
}

/// Expand entries one after another, stopping at the first match.
pub(crate) fn expand_sequential(ctx: &LevelContext<'_>, level: &[FrontierEntry]) -> LevelResult {
    let mut result = LevelResult::default();
    for (index, entry) in level.iter().enumerate() {
        if merge_entry(ctx, &mut result, expand_entry(ctx, index, entry)) {
            break;
        }
    }
    result
}

/// Expand entries on the given pool, then merge per-entry results in entry
/// order. A match at entry `i` stops only entries after `i`, and visited
/// marking happens during the merge, so the outcome is the one sequential
/// expansion produces.
pub(crate) fn expand_parallel(
    ctx: &LevelContext<'_>,
    level: &[FrontierEntry],
    pool: &rayon::ThreadPool,
) -> LevelResult {
    let per_entry: Vec<EntryResult> = pool.install(|| {
        level
            .par_iter()
            .enumerate()
            .map(|(index, entry)| expand_entry(ctx, index, entry))
            .collect()
    });

    let mut result = LevelResult::default();
    let mut per_entry = per_entry.into_iter();
    for expanded in per_entry.by_ref() {
        if merge_entry(ctx, &mut result, expanded) {
            break;
        }
    }
    // Work done past the stopping entry still counts.
    for skipped in per_entry {
        result.stats.absorb(&skipped.stats);
    }
    result
}

/// Fold one entry into the level result. Returns `true` when the level is
/// over: the entry reached the target or was cancelled.
fn merge_entry(ctx: &LevelContext<'_>, result: &mut LevelResult, expanded: EntryResult) -> bool {
    result.stats.absorb(&expanded.stats);
    for candidate in expanded.candidates {
        if ctx.frontier.mark_discovered(&candidate.actor.id) {
            result.stats.actors_discovered += 1;
            result.discovered.push(candidate);
        }
    }
    if expanded.found.is_some() {
        result.found = expanded.found;
        return true;
    }
    if let Some(interrupt) = expanded.interrupted {
        result.interrupted = Some(interrupt);
        return true;
    }
    false
}

fn expand_entry(ctx: &LevelContext<'_>, index: usize, entry: &FrontierEntry) -> EntryResult {
    let mut result = EntryResult::default();
    if let Some(interrupt) = ctx.stop.check_entry(index) {
        result.interrupted = Some(interrupt);
        return result;
    }

    let actor = &entry.actor;
    ctx.reporter.emit(|| {
        ProgressEvent::new(
            SearchPhase::Searching,
            ctx.depth,
            entry_percent(ctx.depth, ctx.max_depth, index, ctx.level_len),
            format!("Checking movies of '{}'", actor.name),
        )
        .with_actor(actor.name.clone())
    });

    result.stats.actors_expanded += 1;
    let movies = match ctx.source.list_movies(actor) {
        Ok(movies) => movies,
        Err(e) => {
            warn!(actor_id = %actor.id, error = %e, "filmography fetch failed; skipping actor");
            result.stats.fetch_failures += 1;
            Vec::new()
        }
    };
    debug!(actor_id = %actor.id, movies = movies.len(), "expanding actor");

    for (movie_index, movie) in movies.iter().enumerate() {
        if let Some(interrupt) = ctx.stop.check_entry(index) {
            result.interrupted = Some(interrupt);
            return result;
        }
        if movie.has_degenerate_title() {
            continue;
        }

        ctx.reporter.emit(|| {
            ProgressEvent::new(
                SearchPhase::Searching,
                ctx.depth,
                movie_percent(
                    ctx.depth,
                    ctx.max_depth,
                    index,
                    ctx.level_len,
                    movie_index,
                    movies.len(),
                ),
                format!("Checking cast of '{}'", movie.title),
            )
            .with_actor(actor.name.clone())
            .with_movie(movie.title.clone())
        });

        result.stats.movies_scanned += 1;
        let cast = match ctx.source.list_cast(movie) {
            Ok(cast) => {
                result.stats.casts_fetched += 1;
                cast
            }
            Err(e) => {
                warn!(movie_id = %movie.id, error = %e, "cast fetch failed; skipping movie");
                result.stats.fetch_failures += 1;
                continue;
            }
        };

        if let Some(path) = scan_cast(ctx, entry, movie, &cast, &mut result) {
            ctx.stop.mark_target_found(index);
            result.found = Some(path);
            return result;
        }
    }
    result
}

/// Walk one cast list in order. Returns the finished path on a target hit;
/// otherwise buffers co-stars not yet visited in earlier levels.
fn scan_cast(
    ctx: &LevelContext<'_>,
    entry: &FrontierEntry,
    movie: &MovieRef,
    cast: &[ActorRef],
    result: &mut EntryResult,
) -> Option<ConnectionPath> {
    for candidate in cast {
        if candidate.id == ctx.target_id {
            return Some(entry.path.extended(Hop::new(&entry.actor, movie, candidate)));
        }
        if !ctx.frontier.is_visited(&candidate.id) {
            result.candidates.push(FrontierEntry {
                actor: candidate.clone(),
                path: entry.path.extended(Hop::new(&entry.actor, movie, candidate)),
            });
        }
    }
    None
}
