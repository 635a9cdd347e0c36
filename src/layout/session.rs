//! State for a single layout pass.
//!
//! One session is created per `calculate_layout` call and threaded through
//! the recursion. It carries the pass generation used for cache
//! invalidation, tracks recursion depth for the verbose logs, and counts
//! what the pass did so the numbers can be dumped afterwards.

use crate::debug::runtime;
use crate::debug::RuntimeToggles;
use std::sync::Arc;
use std::time::Instant;

const SPACER: &str = "                                                            ";

/// Counters for one layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
  /// Full layout computations, including repeated visits to one node
  pub layouts: u64,
  /// Measure-only computations
  pub measures: u64,
  /// Requests answered from a cached measurement
  pub cache_hits: u64,
  /// Measurement rings that overflowed and were cleared
  pub cache_evictions: u64,
  /// Deepest recursion reached
  pub max_depth: usize,
}

pub(crate) struct LayoutSession {
  generation: u32,
  depth: usize,
  stats: LayoutStats,
  started: Instant,
  toggles: Arc<RuntimeToggles>,
}

impl LayoutSession {
  /// Snapshots the runtime toggles so one pass sees a consistent view.
  pub(crate) fn new(generation: u32) -> Self {
    Self {
      generation,
      depth: 0,
      stats: LayoutStats::default(),
      started: Instant::now(),
      toggles: runtime::runtime_toggles(),
    }
  }

  pub(crate) fn generation(&self) -> u32 {
    self.generation
  }

  pub(crate) fn depth(&self) -> usize {
    self.depth
  }

  pub(crate) fn enter(&mut self) {
    self.depth += 1;
    self.stats.max_depth = self.stats.max_depth.max(self.depth);
  }

  pub(crate) fn exit(&mut self) {
    self.depth -= 1;
  }

  /// Indentation matching the current recursion depth, for the verbose
  /// layout logs.
  pub(crate) fn indent(&self) -> &'static str {
    let len = SPACER.len();
    let level = self.depth.min(len);
    &SPACER[len - level..]
  }

  pub(crate) fn record_layout(&mut self) {
    self.stats.layouts += 1;
  }

  pub(crate) fn record_measure(&mut self) {
    self.stats.measures += 1;
  }

  pub(crate) fn record_cache_hit(&mut self) {
    self.stats.cache_hits += 1;
  }

  pub(crate) fn record_cache_eviction(&mut self) {
    self.stats.cache_evictions += 1;
  }

  pub(crate) fn stats(&self) -> LayoutStats {
    self.stats
  }

  pub(crate) fn print_changes(&self) -> bool {
    self.toggles.truthy("FASTFLEX_PRINT_CHANGES")
  }

  pub(crate) fn print_skips(&self) -> bool {
    self.toggles.truthy("FASTFLEX_PRINT_SKIPS")
  }

  pub(crate) fn print_tree(&self) -> bool {
    self.toggles.truthy("FASTFLEX_PRINT_TREE")
  }

  pub(crate) fn cache_disabled(&self) -> bool {
    self.toggles.truthy("FASTFLEX_DISABLE_LAYOUT_CACHE")
  }

  /// Emits the stats line and the slow-pass warning when the matching
  /// toggles are set. Called once at the end of the pass.
  pub(crate) fn log_summary(&self) {
    let elapsed = self.started.elapsed();
    if self.toggles.truthy("FASTFLEX_LAYOUT_STATS") {
      eprintln!(
        "layout stats: generation={} total_ms={:.2} layouts={} measures={} cache_hits={} cache_evictions={} max_depth={}",
        self.generation,
        elapsed.as_secs_f64() * 1000.0,
        self.stats.layouts,
        self.stats.measures,
        self.stats.cache_hits,
        self.stats.cache_evictions,
        self.stats.max_depth,
      );
    }
    if let Some(threshold) = self.toggles.u128("FASTFLEX_LOG_SLOW_LAYOUT_MS") {
      if elapsed.as_millis() >= threshold {
        eprintln!(
          "slow layout: generation={} took {}ms (threshold {}ms, layouts={} measures={})",
          self.generation,
          elapsed.as_millis(),
          threshold,
          self.stats.layouts,
          self.stats.measures,
        );
      }
    }
  }
}
