//! The connection search engine.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use costar_core::config::SearchConfig;
use costar_core::constants::{MAX_SEARCH_DEPTH, RESOLVING_PERCENT};
use costar_core::errors::{CostarError, CostarResult, SearchError};
use costar_core::{
    ActorRef, ActorSide, CancellationToken, ConnectionPath, IDataSource, IProgressSink,
    ProgressEvent, SearchPhase,
};
use costar_observability::{level_span, search_span};

use crate::expansion::{self, LevelContext};
use crate::frontier::Frontier;
use crate::outcome::{NotFoundReason, SearchOutcome, SearchReport, SearchStats};
use crate::progress::{level_percent, ProgressReporter};
use crate::stop::StopSignal;

/// Level-synchronous BFS over the actor/movie graph exposed by a data source.
///
/// The engine owns no graph state between searches; all memoization lives in
/// the data source. One engine may run many searches, sequentially or from
/// several threads.
pub struct SearchEngine {
    source: Arc<dyn IDataSource>,
    config: SearchConfig,
    cancellation: Option<CancellationToken>,
    pool: Option<rayon::ThreadPool>,
}

impl SearchEngine {
    /// Create an engine. A `parallelism` above 1 builds a dedicated worker
    /// pool; if that fails the engine runs sequentially.
    pub fn new(source: Arc<dyn IDataSource>, config: SearchConfig) -> Self {
        let workers = config.effective_parallelism();
        let pool = if workers > 1 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("costar-worker-{i}"))
                .build()
            {
                Ok(pool) => Some(pool),
                Err(e) => {
                    warn!(workers, error = %e, "worker pool unavailable; searching sequentially");
                    None
                }
            }
        } else {
            None
        };

        Self {
            source,
            config,
            cancellation: None,
            pool,
        }
    }

    /// Attach a token; cancelling it stops every running and future search.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn is_parallel(&self) -> bool {
        self.pool.is_some()
    }

    /// Find the shortest co-star chain from `start` to `target`.
    ///
    /// `Err` only for contract violations caught before any lookup: a blank
    /// name or a depth above [`MAX_SEARCH_DEPTH`]. Everything else, including
    /// unknown actors, is reported through the outcome.
    pub fn find_connection(
        &self,
        start: &str,
        target: &str,
        max_depth: usize,
        sink: Option<&dyn IProgressSink>,
    ) -> CostarResult<SearchOutcome> {
        self.search(start, target, max_depth, sink)
            .map(|report| report.outcome)
    }

    /// [`find_connection`](Self::find_connection) with the configured depth.
    pub fn find_connection_default(
        &self,
        start: &str,
        target: &str,
        sink: Option<&dyn IProgressSink>,
    ) -> CostarResult<SearchOutcome> {
        self.find_connection(start, target, self.config.effective_max_depth(), sink)
    }

    /// Run a search and return the outcome with its statistics.
    pub fn search(
        &self,
        start: &str,
        target: &str,
        max_depth: usize,
        sink: Option<&dyn IProgressSink>,
    ) -> CostarResult<SearchReport> {
        let start = validate_name("start", start)?;
        let target = validate_name("target", target)?;
        if max_depth > MAX_SEARCH_DEPTH {
            return Err(CostarError::InvalidArgument {
                field: "max_depth".to_string(),
                reason: format!("{max_depth} exceeds the limit of {MAX_SEARCH_DEPTH}"),
            });
        }

        let search_id = Uuid::new_v4().to_string();
        let span = search_span!(search_id, start, target, max_depth);
        let _guard = span.enter();
        info!(source = self.source.name(), "search started");

        let run = SearchRun {
            source: self.source.as_ref(),
            reporter: ProgressReporter::new(sink),
            stop: StopSignal::new(self.cancellation.clone(), self.config.timeout()),
            pool: self.pool.as_ref(),
            stats: SearchStats::default(),
        };
        let (outcome, stats) = run.execute(start, target, max_depth);

        match &outcome {
            SearchOutcome::Found { path } => info!(hops = path.len(), "connection found"),
            SearchOutcome::NotFound { reason } => info!(?reason, "no connection"),
            SearchOutcome::Failed { error } => warn!(%error, "search failed"),
        }

        Ok(SearchReport {
            search_id,
            start: start.to_string(),
            target: target.to_string(),
            max_depth,
            outcome,
            stats,
        })
    }
}

fn validate_name<'n>(field: &str, name: &'n str) -> CostarResult<&'n str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CostarError::InvalidArgument {
            field: field.to_string(),
            reason: "actor name must not be blank".to_string(),
        });
    }
    Ok(trimmed)
}

/// Per-search state. Dropped when the search returns.
struct SearchRun<'a> {
    source: &'a dyn IDataSource,
    reporter: ProgressReporter<'a>,
    stop: StopSignal,
    pool: Option<&'a rayon::ThreadPool>,
    stats: SearchStats,
}

impl SearchRun<'_> {
    fn execute(mut self, start: &str, target: &str, max_depth: usize) -> (SearchOutcome, SearchStats) {
        let outcome = self.run(start, target, max_depth);
        self.stats.elapsed_ms = self.stop.elapsed().as_millis() as u64;
        (outcome, self.stats)
    }

    fn run(&mut self, start: &str, target: &str, max_depth: usize) -> SearchOutcome {
        self.reporter.emit(|| {
            ProgressEvent::new(
                SearchPhase::Resolving,
                0,
                RESOLVING_PERCENT,
                format!("Looking up '{start}' and '{target}'"),
            )
        });

        let start_actor = match self.resolve(ActorSide::Start, start) {
            Ok(actor) => actor,
            Err(error) => return self.fail(0, error),
        };
        let target_actor = match self.resolve(ActorSide::Target, target) {
            Ok(actor) => actor,
            Err(error) => return self.fail(0, error),
        };

        if start_actor.id == target_actor.id {
            self.reporter.finish(SearchPhase::Completed, 0, || {
                format!("'{start}' and '{target}' are the same actor")
            });
            return SearchOutcome::found(ConnectionPath::empty());
        }

        self.bfs(start_actor, &target_actor, max_depth)
    }

    /// Resolution failures, including lookup errors, are terminal.
    fn resolve(&self, side: ActorSide, name: &str) -> Result<ActorRef, SearchError> {
        let unresolved = || SearchError::UnresolvedActor {
            side,
            name: name.to_string(),
        };
        match self.source.resolve_actor(name) {
            Ok(Some(actor)) => {
                debug!(%side, name, actor_id = %actor.id, "actor resolved");
                Ok(actor)
            }
            Ok(None) => Err(unresolved()),
            Err(e) => {
                warn!(%side, name, error = %e, "actor lookup failed");
                Err(unresolved())
            }
        }
    }

    fn bfs(&mut self, start: ActorRef, target: &ActorRef, max_depth: usize) -> SearchOutcome {
        let mut frontier = Frontier::seeded(start);

        for depth in 1..=max_depth {
            if let Some(interrupt) = self.stop.check() {
                if let Some(error) = interrupt.into_error(depth, self.stop.elapsed()) {
                    return self.fail(depth, error);
                }
            }
            if frontier.is_empty() {
                let levels = depth - 1;
                self.reporter.finish(SearchPhase::Completed, levels, || {
                    format!("No connection: every reachable actor was searched in {levels} levels")
                });
                return SearchOutcome::NotFound {
                    reason: NotFoundReason::Exhausted { depth: levels },
                };
            }

            let level = frontier.take_level();
            let level_len = level.len();
            let span = level_span!(depth, level_len);
            let _guard = span.enter();
            self.stats.levels_processed += 1;
            self.reporter.emit(|| {
                ProgressEvent::new(
                    SearchPhase::Searching,
                    depth,
                    level_percent(depth, max_depth),
                    format!("Searching depth {depth} ({level_len} actors queued)"),
                )
            });

            let ctx = LevelContext {
                source: self.source,
                target_id: &target.id,
                frontier: &frontier,
                reporter: &self.reporter,
                stop: &self.stop,
                depth,
                max_depth,
                level_len,
            };
            let result = match self.pool {
                Some(pool) if level_len > 1 => expansion::expand_parallel(&ctx, &level, pool),
                _ => expansion::expand_sequential(&ctx, &level),
            };
            self.stats.absorb(&result.stats);

            if let Some(path) = result.found {
                let hops = path.len();
                self.reporter
                    .finish(SearchPhase::Completed, depth, || format!("Connection found: {hops} hops"));
                return SearchOutcome::found(path);
            }
            if let Some(error) = result
                .interrupted
                .and_then(|i| i.into_error(depth, self.stop.elapsed()))
            {
                return self.fail(depth, error);
            }

            debug!(depth, discovered = result.discovered.len(), "level complete");
            frontier.extend(result.discovered);
        }

        self.reporter.finish(SearchPhase::Completed, max_depth, || {
            format!("No connection within {max_depth} levels")
        });
        SearchOutcome::NotFound {
            reason: NotFoundReason::DepthLimitReached { max_depth },
        }
    }

    fn fail(&self, depth: usize, error: SearchError) -> SearchOutcome {
        let message = error.to_string();
        self.reporter.finish(SearchPhase::Failed, depth, || message);
        SearchOutcome::Failed { error }
    }
}
