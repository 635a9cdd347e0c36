//! Measurement caching for incremental layout.
//!
//! Every node remembers the results of recent measure passes keyed by the
//! constraints that produced them. Full layout results get a dedicated
//! slot; pure measurements share a small ring. A cached entry can satisfy a
//! new request even under different constraints when the compatibility
//! rules here prove the result could not change.

use crate::layout::rounding::round_value_to_pixel_grid;
use crate::layout::MeasureMode;
use crate::style::value::floats_equal;

/// Number of measurement slots kept per node.
pub(crate) const MAX_CACHED_RESULTS: usize = 16;

/// One remembered measurement: the constraints that were asked for and the
/// size that came back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedMeasurement {
  pub(crate) available_width: f32,
  pub(crate) available_height: f32,
  /// `None` marks a slot that holds no usable result
  pub(crate) width_mode: Option<MeasureMode>,
  pub(crate) height_mode: Option<MeasureMode>,
  pub(crate) computed_width: f32,
  pub(crate) computed_height: f32,
}

impl CachedMeasurement {
  /// An empty slot. The negative computed sizes keep it from ever
  /// satisfying a lookup.
  pub(crate) fn invalid() -> Self {
    Self {
      available_width: 0.0,
      available_height: 0.0,
      width_mode: None,
      height_mode: None,
      computed_width: -1.0,
      computed_height: -1.0,
    }
  }

  /// True when this entry was produced under exactly these constraints.
  pub(crate) fn matches_constraints(
    &self,
    available_width: f32,
    available_height: f32,
    width_mode: MeasureMode,
    height_mode: MeasureMode,
  ) -> bool {
    floats_equal(self.available_width, available_width)
      && floats_equal(self.available_height, available_height)
      && self.width_mode == Some(width_mode)
      && self.height_mode == Some(height_mode)
  }
}

/// An exact constraint is satisfied by a previous result of the same size,
/// however that result was produced.
fn size_is_exact_and_matches_old_measured_size(
  mode: MeasureMode,
  size: f32,
  last_computed_size: f32,
) -> bool {
  mode == MeasureMode::Exactly && floats_equal(size, last_computed_size)
}

/// A natural-size measurement still fits under a new cap at least as large.
fn old_size_is_unspecified_and_still_fits(
  mode: MeasureMode,
  size: f32,
  last_mode: Option<MeasureMode>,
  last_computed_size: f32,
) -> bool {
  mode == MeasureMode::AtMost
    && last_mode == Some(MeasureMode::Undefined)
    && (size >= last_computed_size || floats_equal(size, last_computed_size))
}

/// A tighter cap than last time changes nothing when the old result
/// already fit under the new cap.
fn new_size_is_stricter_and_still_valid(
  mode: MeasureMode,
  size: f32,
  last_mode: Option<MeasureMode>,
  last_size: f32,
  last_computed_size: f32,
) -> bool {
  last_mode == Some(MeasureMode::AtMost)
    && mode == MeasureMode::AtMost
    && last_size > size
    && (last_computed_size <= size || floats_equal(size, last_computed_size))
}

/// Decides whether a cached measurement answers a new measure request.
///
/// Both axes must be compatible: either the constraint is unchanged (after
/// snapping to the pixel grid, so sub-pixel drift does not defeat the
/// cache) or one of the single-axis rules proves the result would repeat.
pub(crate) fn can_use_cached_measurement(
  width_mode: MeasureMode,
  available_width: f32,
  height_mode: MeasureMode,
  available_height: f32,
  cached: &CachedMeasurement,
  margin_row: f32,
  margin_column: f32,
  point_scale_factor: f32,
) -> bool {
  if cached.computed_height < 0.0 || cached.computed_width < 0.0 {
    return false;
  }

  let use_rounded_comparison = point_scale_factor != 0.0;
  let round = |value: f32| {
    if use_rounded_comparison {
      round_value_to_pixel_grid(value, point_scale_factor, false, false)
    } else {
      value
    }
  };
  let effective_width = round(available_width);
  let effective_height = round(available_height);
  let effective_last_width = round(cached.available_width);
  let effective_last_height = round(cached.available_height);

  let has_same_width_spec = cached.width_mode == Some(width_mode)
    && floats_equal(effective_last_width, effective_width);
  let has_same_height_spec = cached.height_mode == Some(height_mode)
    && floats_equal(effective_last_height, effective_height);

  let width_is_compatible = has_same_width_spec
    || size_is_exact_and_matches_old_measured_size(
      width_mode,
      available_width - margin_row,
      cached.computed_width,
    )
    || old_size_is_unspecified_and_still_fits(
      width_mode,
      available_width - margin_row,
      cached.width_mode,
      cached.computed_width,
    )
    || new_size_is_stricter_and_still_valid(
      width_mode,
      available_width - margin_row,
      cached.width_mode,
      cached.available_width,
      cached.computed_width,
    );

  let height_is_compatible = has_same_height_spec
    || size_is_exact_and_matches_old_measured_size(
      height_mode,
      available_height - margin_column,
      cached.computed_height,
    )
    || old_size_is_unspecified_and_still_fits(
      height_mode,
      available_height - margin_column,
      cached.height_mode,
      cached.computed_height,
    )
    || new_size_is_stricter_and_still_valid(
      height_mode,
      available_height - margin_column,
      cached.height_mode,
      cached.available_height,
      cached.computed_height,
    );

  width_is_compatible && height_is_compatible
}
