//! Engine behaviour against fixed catalogs.

use std::sync::Arc;
use std::time::Duration;

use costar_core::config::SearchConfig;
use costar_core::constants::MAX_SEARCH_DEPTH;
use costar_core::errors::{CostarError, SearchError};
use costar_core::{
    ActorSide, CancellationToken, IDataSource, IProgressSink, ProgressEvent, SearchPhase,
};
use costar_search::{ChannelProgressSink, NotFoundReason, SearchEngine, SearchOutcome};
use test_fixtures::{
    islands_catalog, two_hop_catalog, CatalogBuilder, CountingSource, FlakySource, SlowSource,
};

fn engine(source: impl IDataSource + 'static) -> SearchEngine {
    SearchEngine::new(Arc::new(source), SearchConfig::default())
}

fn parallel_engine(source: impl IDataSource + 'static, workers: usize) -> SearchEngine {
    let config = SearchConfig {
        parallelism: Some(workers),
        ..Default::default()
    };
    SearchEngine::new(Arc::new(source), config)
}

fn hops(outcome: &SearchOutcome) -> Vec<(String, String, String)> {
    outcome
        .path()
        .expect("expected a path")
        .hops()
        .iter()
        .map(|h| (h.from_actor.clone(), h.movie.clone(), h.to_actor.clone()))
        .collect()
}

fn hop(from: &str, movie: &str, to: &str) -> (String, String, String) {
    (from.into(), movie.into(), to.into())
}

/// Run a search with a collecting sink.
fn search_with_events(
    engine: &SearchEngine,
    start: &str,
    target: &str,
    max_depth: usize,
) -> (SearchOutcome, Vec<ProgressEvent>) {
    let (sink, rx) = ChannelProgressSink::unbounded();
    let outcome = engine
        .find_connection(start, target, max_depth, Some(&sink))
        .unwrap();
    (outcome, rx.try_iter().collect())
}

// =============================================================================
// Paths
// =============================================================================

#[test]
fn two_hop_connection() {
    let outcome = engine(two_hop_catalog())
        .find_connection("A", "D", 6, None)
        .unwrap();
    assert_eq!(
        hops(&outcome),
        vec![hop("A", "movie1", "B"), hop("B", "movie2", "D")]
    );
}

#[test]
fn direct_co_star_is_one_hop() {
    let outcome = engine(two_hop_catalog())
        .find_connection("A", "C", 6, None)
        .unwrap();
    assert_eq!(hops(&outcome), vec![hop("A", "movie1", "C")]);
}

#[test]
fn path_display_is_numbered() {
    let outcome = engine(two_hop_catalog())
        .find_connection("A", "D", 6, None)
        .unwrap();
    let text = outcome.path().unwrap().to_string();
    assert!(text.contains("1. A → 「movie1」 → B"), "{text}");
    assert!(text.contains("2. B → 「movie2」 → D"), "{text}");
}

#[test]
fn same_actor_short_circuits_without_expansion() {
    let source = Arc::new(CountingSource::new(two_hop_catalog()));
    let engine = SearchEngine::new(source.clone(), SearchConfig::default());

    let outcome = engine.find_connection("A", "a", 6, None).unwrap();
    let path = outcome.path().unwrap();
    assert!(path.is_self_connection());
    assert_eq!(source.movie_calls(), 0);
    assert_eq!(source.cast_calls(), 0);
}

#[test]
fn same_actor_wins_even_at_depth_zero() {
    let outcome = engine(two_hop_catalog())
        .find_connection("A", "A", 0, None)
        .unwrap();
    assert!(outcome.path().unwrap().is_empty());
}

#[test]
fn first_co_star_in_catalog_order_wins_ties() {
    // B and C both reach D in two hops; B precedes C in movie1's cast.
    let catalog = CatalogBuilder::new()
        .movie("m1", &["A", "B", "C"])
        .movie("m2", &["C", "D"])
        .movie("m3", &["B", "D"])
        .build();
    let outcome = engine(catalog).find_connection("A", "D", 6, None).unwrap();
    assert_eq!(hops(&outcome), vec![hop("A", "m1", "B"), hop("B", "m3", "D")]);
}

#[test]
fn shorter_path_wins_over_earlier_longer_one() {
    let catalog = CatalogBuilder::new()
        .movie("m1", &["A", "B"])
        .movie("m2", &["B", "C"])
        .movie("m3", &["C", "T"])
        .movie("m4", &["A", "E"])
        .movie("m5", &["E", "T"])
        .build();
    let outcome = engine(catalog).find_connection("A", "T", 6, None).unwrap();
    assert_eq!(hops(&outcome), vec![hop("A", "m4", "E"), hop("E", "m5", "T")]);
}

#[test]
fn target_check_precedes_visited_check() {
    // A appears in the cast of its own movie; the target sits after it.
    let catalog = CatalogBuilder::new().movie("m1", &["A", "T"]).build();
    let outcome = engine(catalog).find_connection("A", "T", 1, None).unwrap();
    assert_eq!(hops(&outcome), vec![hop("A", "m1", "T")]);
}

// =============================================================================
// Not found
// =============================================================================

#[test]
fn depth_limit_reached() {
    let outcome = engine(two_hop_catalog())
        .find_connection("A", "D", 1, None)
        .unwrap();
    assert_eq!(
        outcome,
        SearchOutcome::NotFound {
            reason: NotFoundReason::DepthLimitReached { max_depth: 1 }
        }
    );
}

#[test]
fn depth_zero_never_expands() {
    let source = Arc::new(CountingSource::new(two_hop_catalog()));
    let engine = SearchEngine::new(source.clone(), SearchConfig::default());
    let outcome = engine.find_connection("A", "C", 0, None).unwrap();
    assert_eq!(
        outcome,
        SearchOutcome::NotFound {
            reason: NotFoundReason::DepthLimitReached { max_depth: 0 }
        }
    );
    assert_eq!(source.movie_calls(), 0);
}

#[test]
fn disconnected_component_is_exhausted() {
    let outcome = engine(islands_catalog())
        .find_connection("A", "Y", 6, None)
        .unwrap();
    assert_eq!(
        outcome,
        SearchOutcome::NotFound {
            reason: NotFoundReason::Exhausted { depth: 2 }
        }
    );
}

#[test]
fn long_chain_needs_enough_depth() {
    let catalog = CatalogBuilder::new().chain("c", 8).build();
    let engine = engine(catalog);
    assert!(engine.find_connection("c0", "c8", 7, None).unwrap().is_not_found());
    let outcome = engine.find_connection("c0", "c8", 8, None).unwrap();
    assert_eq!(outcome.path().unwrap().len(), 8);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn unknown_start_is_reported_and_target_skipped() {
    let source = Arc::new(CountingSource::new(two_hop_catalog()));
    let engine = SearchEngine::new(source.clone(), SearchConfig::default());
    let outcome = engine.find_connection("Nobody", "D", 6, None).unwrap();
    assert_eq!(
        outcome.error(),
        Some(&SearchError::UnresolvedActor {
            side: ActorSide::Start,
            name: "Nobody".into()
        })
    );
    assert_eq!(source.resolve_calls(), 1);
}

#[test]
fn unknown_target_is_reported() {
    let outcome = engine(two_hop_catalog())
        .find_connection("A", "Nobody", 6, None)
        .unwrap();
    let error = outcome.error().unwrap();
    assert_eq!(
        error,
        &SearchError::UnresolvedActor {
            side: ActorSide::Target,
            name: "Nobody".into()
        }
    );
    assert!(error.to_string().contains("Nobody"));
}

#[test]
fn failed_lookup_counts_as_unresolved() {
    let source = FlakySource::new(two_hop_catalog()).fail_resolve("D");
    let outcome = engine(source).find_connection("A", "D", 6, None).unwrap();
    assert!(matches!(
        outcome.error(),
        Some(SearchError::UnresolvedActor {
            side: ActorSide::Target,
            ..
        })
    ));
}

#[test]
fn invalid_arguments_are_rejected_before_lookup() {
    let source = Arc::new(CountingSource::new(two_hop_catalog()));
    let engine = SearchEngine::new(source.clone(), SearchConfig::default());

    for (start, target, depth) in [("  ", "D", 6), ("A", "", 6), ("A", "D", 13)] {
        let err = engine.find_connection(start, target, depth, None).unwrap_err();
        assert!(matches!(err, CostarError::InvalidArgument { .. }), "{err}");
    }
    assert_eq!(source.resolve_calls(), 0);
}

#[test]
fn depth_ceiling_is_inclusive() {
    let engine = engine(CatalogBuilder::new().chain("c", 14).build());
    let at_limit = engine
        .find_connection("c0", "c12", MAX_SEARCH_DEPTH, None)
        .unwrap();
    assert_eq!(at_limit.path().unwrap().len(), MAX_SEARCH_DEPTH);

    let err = engine
        .find_connection("c0", "c13", MAX_SEARCH_DEPTH + 1, None)
        .unwrap_err();
    assert!(matches!(err, CostarError::InvalidArgument { .. }), "{err}");
    assert!(err.to_string().contains("13"), "{err}");
}

#[test]
fn failed_cast_fetch_is_skipped_not_fatal() {
    let catalog = CatalogBuilder::new()
        .movie("m1", &["A", "B"])
        .movie("m3", &["A", "E"])
        .movie("m2", &["B", "D"])
        .movie("m4", &["E", "D"])
        .build();
    let source = FlakySource::new(catalog).fail_cast("m1");
    let report = engine(source).search("A", "D", 6, None).unwrap();
    assert_eq!(
        hops(&report.outcome),
        vec![hop("A", "m3", "E"), hop("E", "m4", "D")]
    );
    assert_eq!(report.stats.fetch_failures, 1);
}

#[test]
fn failed_filmography_fetch_leaves_actor_unexpanded() {
    let source = FlakySource::new(two_hop_catalog()).fail_movies("nmA");
    let report = engine(source).search("A", "D", 6, None).unwrap();
    assert_eq!(
        report.outcome,
        SearchOutcome::NotFound {
            reason: NotFoundReason::Exhausted { depth: 1 }
        }
    );
    assert_eq!(report.stats.fetch_failures, 1);
}

// =============================================================================
// Cancellation and timeout
// =============================================================================

#[test]
fn cancelled_before_start() {
    let token = CancellationToken::new();
    token.cancel();
    let engine = engine(two_hop_catalog()).with_cancellation(token);
    let (outcome, events) = search_with_events(&engine, "A", "D", 6);
    assert_eq!(outcome.error(), Some(&SearchError::Cancelled { depth: 1 }));
    let last = events.last().unwrap();
    assert_eq!(last.phase, SearchPhase::Failed);
    assert_eq!(last.percent, 100.0);
}

#[test]
fn cancelled_mid_search_from_the_sink() {
    let catalog = CatalogBuilder::new().chain("c", 10).build();
    let token = CancellationToken::new();
    let engine = engine(catalog).with_cancellation(token.clone());

    let cancel_on_depth_two = move |event: &ProgressEvent| {
        if event.depth == 2 {
            token.cancel();
        }
    };
    let report = engine
        .search("c0", "c10", 12, Some(&cancel_on_depth_two))
        .unwrap();
    match report.outcome.error() {
        Some(SearchError::Cancelled { depth }) => assert_eq!(*depth, 2),
        other => panic!("expected cancellation, got {other:?}"),
    }
    assert_eq!(report.stats.levels_processed, 2);
}

#[test]
fn timeout_ends_a_slow_search() {
    let catalog = CatalogBuilder::new().chain("c", 12).build();
    let source = SlowSource::new(catalog, Duration::from_millis(100));
    let config = SearchConfig {
        timeout_secs: Some(1),
        ..Default::default()
    };
    let engine = SearchEngine::new(Arc::new(source), config);
    let outcome = engine.find_connection("c0", "c12", 12, None).unwrap();
    assert!(
        matches!(outcome.error(), Some(SearchError::TimedOut { .. })),
        "{outcome:?}"
    );
}

// =============================================================================
// Progress
// =============================================================================

#[test]
fn progress_is_monotonic_and_ends_with_one_terminal_event() {
    let engine = engine(two_hop_catalog());
    let (outcome, events) = search_with_events(&engine, "A", "D", 6);
    assert!(outcome.is_found());

    assert_eq!(events.first().unwrap().phase, SearchPhase::Resolving);
    assert!(events.windows(2).all(|w| w[0].percent <= w[1].percent));
    assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
    let last = events.last().unwrap();
    assert!(last.is_terminal());
    assert_eq!(last.phase, SearchPhase::Completed);
    assert_eq!(last.percent, 100.0);
}

#[test]
fn search_events_name_level_actor_and_movie() {
    let engine = engine(two_hop_catalog());
    let (_, events) = search_with_events(&engine, "A", "D", 6);
    let searching: Vec<&ProgressEvent> = events
        .iter()
        .filter(|e| e.phase == SearchPhase::Searching)
        .collect();

    assert!(searching
        .iter()
        .all(|e| e.percent >= 20.0 && e.percent < 90.0));
    assert!(searching
        .iter()
        .any(|e| e.depth == 1 && e.message.contains("1 actors queued")));
    assert!(searching
        .iter()
        .any(|e| e.actor_name.as_deref() == Some("B") && e.movie_title.is_none()));
    assert!(searching
        .iter()
        .any(|e| e.movie_title.as_deref() == Some("movie2")));
}

#[test]
fn every_terminal_kind_reports_one_event() {
    let engine = engine(two_hop_catalog());
    let cases = [("A", "A", 6), ("A", "D", 1), ("Nobody", "D", 6), ("A", "Nobody", 6)];
    for (start, target, depth) in cases {
        let (_, events) = search_with_events(&engine, start, target, depth);
        let terminal: Vec<_> = events.iter().filter(|e| e.is_terminal()).collect();
        assert_eq!(terminal.len(), 1, "{start} → {target}");
        assert_eq!(terminal[0].percent, 100.0);
        assert!(events.last().unwrap().is_terminal());
    }
}

#[test]
fn closures_work_as_sinks() {
    let seen = std::sync::Mutex::new(Vec::new());
    let sink = |event: &ProgressEvent| seen.lock().unwrap().push(event.phase);
    engine(two_hop_catalog())
        .find_connection("A", "C", 6, Some(&sink as &dyn IProgressSink))
        .unwrap();
    let phases = seen.into_inner().unwrap();
    assert_eq!(phases.first(), Some(&SearchPhase::Resolving));
    assert_eq!(phases.last(), Some(&SearchPhase::Completed));
}

// =============================================================================
// Report and statistics
// =============================================================================

#[test]
fn report_carries_statistics() {
    let report = engine(two_hop_catalog()).search("A", "D", 6, None).unwrap();
    assert!(!report.search_id.is_empty());
    assert_eq!(report.start, "A");
    assert_eq!(report.target, "D");
    assert_eq!(report.stats.levels_processed, 2);
    assert_eq!(report.stats.actors_expanded, 2);
    assert_eq!(report.stats.movies_scanned, 3);
    assert_eq!(report.stats.casts_fetched, 3);
    assert_eq!(report.stats.actors_discovered, 2);
    assert_eq!(report.stats.fetch_failures, 0);
}

#[test]
fn report_serializes_with_status_tag() {
    let report = engine(two_hop_catalog()).search("A", "D", 6, None).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["outcome"]["status"], "found");
    assert_eq!(json["outcome"]["path"][0]["from_actor"], "A");
    assert_eq!(json["stats"]["levels_processed"], 2);
}

#[test]
fn default_depth_comes_from_config() {
    let catalog = CatalogBuilder::new().chain("c", 3).build();
    let config = SearchConfig {
        max_depth: Some(2),
        ..Default::default()
    };
    let engine = SearchEngine::new(Arc::new(catalog), config);
    let outcome = engine.find_connection_default("c0", "c3", None).unwrap();
    assert_eq!(
        outcome,
        SearchOutcome::NotFound {
            reason: NotFoundReason::DepthLimitReached { max_depth: 2 }
        }
    );
}

// =============================================================================
// Parallel expansion
// =============================================================================

#[test]
fn parallel_engine_finds_the_sequential_path() {
    let catalog = CatalogBuilder::new()
        .movie("m1", &["A", "B", "C", "E"])
        .movie("m2", &["C", "F"])
        .movie("m3", &["E", "G"])
        .movie("m4", &["F", "T"])
        .movie("m5", &["G", "T"])
        .build();
    let sequential = engine(catalog.clone()).find_connection("A", "T", 6, None).unwrap();
    let parallel_engine = parallel_engine(catalog, 4);
    assert!(parallel_engine.is_parallel());
    let parallel = parallel_engine.find_connection("A", "T", 6, None).unwrap();
    assert_eq!(sequential.path().unwrap().len(), 3);
    assert_eq!(parallel, sequential);
}

#[test]
fn later_entry_cannot_win_over_a_slower_earlier_one() {
    // BB is expanded before CC, but BB's second movie is slow, so CC reaches
    // the target first on the wall clock.
    let catalog = CatalogBuilder::new()
        .movie("m0", &["AA", "BB", "CC"])
        .movie("mslow", &["BB", "XX"])
        .movie("mB", &["BB", "TT"])
        .movie("mC", &["CC", "TT"])
        .build();
    let expected = vec![hop("AA", "m0", "BB"), hop("BB", "mB", "TT")];

    let sequential = engine(catalog.clone()).find_connection("AA", "TT", 6, None).unwrap();
    assert_eq!(hops(&sequential), expected);

    let slow = SlowSource::new(catalog, Duration::from_millis(300)).only_cast_of("mslow");
    let parallel = parallel_engine(slow, 4).find_connection("AA", "TT", 6, None).unwrap();
    assert_eq!(hops(&parallel), expected);
    assert_eq!(parallel, sequential);
}

#[test]
fn parallel_next_level_keeps_sequential_order() {
    // X is a co-star of both B and C; it must keep the path through B.
    let catalog = CatalogBuilder::new()
        .movie("m0", &["A", "B", "C"])
        .movie("mb", &["B", "X"])
        .movie("mc", &["C", "X", "Y"])
        .movie("mx", &["X", "T"])
        .movie("my", &["Y", "T"])
        .build();
    let sequential = engine(catalog.clone()).find_connection("A", "T", 6, None).unwrap();
    let slow = SlowSource::new(catalog, Duration::from_millis(200)).only_cast_of("mb");
    let parallel = parallel_engine(slow, 4).find_connection("A", "T", 6, None).unwrap();
    assert_eq!(
        hops(&parallel),
        vec![hop("A", "m0", "B"), hop("B", "mb", "X"), hop("X", "mx", "T")]
    );
    assert_eq!(parallel, sequential);
}

#[test]
fn parallel_progress_stays_monotonic() {
    let catalog = CatalogBuilder::new()
        .movie("m1", &["A", "B", "C", "D", "E"])
        .movie("m2", &["B", "F"])
        .movie("m3", &["C", "G"])
        .movie("m4", &["D", "H"])
        .movie("m5", &["E", "I"])
        .build();
    let engine = parallel_engine(catalog, 4);
    let (found, events) = search_with_events(&engine, "A", "I", 6);
    assert_eq!(found.path().unwrap().len(), 2);
    let (not_found, events_2) = search_with_events(&engine, "B", "I", 1);
    assert!(not_found.is_not_found());
    for events in [events, events_2] {
        assert!(events.windows(2).all(|w| w[0].percent <= w[1].percent));
        assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
    }
}

#[test]
fn parallel_discovery_is_unique() {
    // Every level-two actor is reachable from all three level-one actors.
    let catalog = CatalogBuilder::new()
        .movie("m0", &["A", "B", "C", "D"])
        .movie("m1", &["B", "X", "Y"])
        .movie("m2", &["C", "X", "Y"])
        .movie("m3", &["D", "X", "Y"])
        .actor("Z")
        .build();
    let report = parallel_engine(catalog, 3).search("A", "Z", 6, None).unwrap();
    assert_eq!(
        report.outcome,
        SearchOutcome::NotFound {
            reason: NotFoundReason::Exhausted { depth: 3 }
        }
    );
    // B, C, D, X, Y: each discovered exactly once.
    assert_eq!(report.stats.actors_discovered, 5);
}

#[test]
fn one_engine_serves_concurrent_searches() {
    let engine = Arc::new(engine(two_hop_catalog()));
    let handles: Vec<_> = ["C", "D", "B"]
        .into_iter()
        .map(|target| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || engine.find_connection("A", target, 6, None).unwrap())
        })
        .collect();
    let lengths: Vec<usize> = handles
        .into_iter()
        .map(|h| h.join().unwrap().path().unwrap().len())
        .collect();
    assert_eq!(lengths, vec![1, 2, 1]);
}
