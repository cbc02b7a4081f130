//! Track sizing for grid rows and columns.
//!
//! Axis-agnostic: the grid calls [`resolve_tracks`] once for rows and once
//! for columns. Fixed tracks take their literal size, auto tracks grow to fit
//! the cells that occupy them, and star tracks share what is left in
//! proportion to their weights.

use super::grid::GridDefinition;

/// A cell's claim on one axis: the tracks it spans and the extent it wants
/// (desired size plus margin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackRequest {
    pub start: usize,
    pub span: usize,
    pub desired: f32,
}

/// Resolved track sizes for one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackResolution {
    pub sizes: Vec<f32>,
    /// Distribution passes the star loop ran. Never exceeds the star count.
    pub star_passes: usize,
}

impl TrackResolution {
    pub fn total(&self) -> f32 {
        self.sizes.iter().sum()
    }

    /// Cumulative start offsets, with the total extent as the final entry.
    pub fn offsets(&self) -> Vec<f32> {
        let mut offsets = Vec::with_capacity(self.sizes.len() + 1);
        let mut cursor = 0.0;
        offsets.push(cursor);
        for size in &self.sizes {
            cursor += size;
            offsets.push(cursor);
        }
        offsets
    }
}

/// Resolve every track on one axis against `available`.
///
/// With an unbounded `available`, star tracks have nothing to share and are
/// sized like auto tracks.
pub fn resolve_tracks(definitions: &[GridDefinition], cells: &[TrackRequest], available: f32) -> TrackResolution {
    let unbounded = !available.is_finite();
    let is_content_sized = |def: &GridDefinition| def.is_auto() || (unbounded && def.is_star());

    let mut sizes: Vec<f32> = definitions
        .iter()
        .map(GridDefinition::fixed_size)
        .collect();

    // Spanning cells split their extent evenly across the span.
    for cell in cells {
        let end = (cell.start + cell.span).min(definitions.len());
        if cell.start >= end {
            continue;
        }
        let share = cell.desired / cell.span.max(1) as f32;
        for track in cell.start..end {
            if is_content_sized(&definitions[track]) {
                sizes[track] = sizes[track].max(share);
            }
        }
    }

    for (size, def) in sizes.iter_mut().zip(definitions) {
        if !def.is_star() || unbounded {
            *size = def.clamp(*size);
        }
    }

    if unbounded {
        return TrackResolution { sizes, star_passes: 0 };
    }

    let used: f32 = sizes
        .iter()
        .zip(definitions)
        .filter(|(_, def)| !def.is_star())
        .map(|(size, _)| size)
        .sum();

    let star_passes = distribute_star(&mut sizes, definitions, available - used);
    TrackResolution { sizes, star_passes }
}

/// Share `budget` among star tracks by weight, honouring each track's
/// min/max limits.
///
/// Each pass proposes `weight * unit` for every unresolved track and clamps
/// the proposal to the track's limits. If the clamps add space overall, the
/// tracks raised to their floor are frozen. If they remove space, the tracks
/// cut to their cap are frozen. Otherwise every track keeps its clamped size.
/// Frozen space leaves the budget and the rest is redistributed. A pass either freezes at least one track or settles
/// everything, so the pass count is bounded by the number of star tracks.
///
/// Returns the number of passes run.
pub(crate) fn distribute_star(sizes: &mut [f32], definitions: &[GridDefinition], budget: f32) -> usize {
    let mut unresolved: Vec<usize> = Vec::new();
    for (index, def) in definitions.iter().enumerate() {
        if def.is_star() {
            sizes[index] = def.min_size;
            if def.star_value() > 0.0 {
                unresolved.push(index);
            }
        }
    }

    let mut remaining = budget;
    if remaining <= 0.0 {
        return 0;
    }

    let mut passes = 0;
    while !unresolved.is_empty() {
        passes += 1;

        let total_weight: f32 = unresolved.iter().map(|&i| definitions[i].star_value()).sum();
        let unit = remaining / total_weight;

        let mut adjustment = 0.0;
        let mut grew = Vec::new();
        let mut shrank = Vec::new();
        for &i in &unresolved {
            let def = &definitions[i];
            let proposed = def.star_value() * unit;
            let clamped = def.clamp(proposed);
            sizes[i] = clamped;
            adjustment += clamped - proposed;
            if clamped > proposed {
                grew.push(i);
            } else if clamped < proposed {
                shrank.push(i);
            }
        }

        let frozen = if adjustment > ADJUSTMENT_EPSILON {
            grew
        } else if adjustment < -ADJUSTMENT_EPSILON {
            shrank
        } else {
            break;
        };

        for &i in &frozen {
            remaining -= sizes[i];
        }
        unresolved.retain(|i| !frozen.contains(i));
    }

    passes
}

/// Net clamp adjustment treated as balanced.
const ADJUSTMENT_EPSILON: f32 = 1e-3;

#[cfg(test)]
mod tests {
    use super::*;

    fn request(start: usize, span: usize, desired: f32) -> TrackRequest {
        TrackRequest { start, span, desired }
    }

    #[test]
    fn test_fixed_and_auto() {
        let defs = [GridDefinition::fixed(40.0), GridDefinition::auto()];
        let resolved = resolve_tracks(&defs, &[request(1, 1, 25.0), request(1, 1, 30.0)], 200.0);
        assert_eq!(resolved.sizes, vec![40.0, 30.0]);
        assert_eq!(resolved.total(), 70.0);
    }

    #[test]
    fn test_auto_empty_track_is_zero() {
        let defs = [GridDefinition::auto(), GridDefinition::auto()];
        let resolved = resolve_tracks(&defs, &[request(0, 1, 10.0)], 100.0);
        assert_eq!(resolved.sizes, vec![10.0, 0.0]);
    }

    #[test]
    fn test_spanning_cell_splits_evenly() {
        let defs = [GridDefinition::auto(), GridDefinition::auto()];
        let resolved = resolve_tracks(&defs, &[request(0, 2, 50.0)], 100.0);
        assert_eq!(resolved.sizes, vec![25.0, 25.0]);
    }

    #[test]
    fn test_star_proportional() {
        let defs = [GridDefinition::star(1.0), GridDefinition::star(3.0)];
        let resolved = resolve_tracks(&defs, &[], 200.0);
        assert_eq!(resolved.sizes, vec![50.0, 150.0]);
        assert_eq!(resolved.star_passes, 1);
    }

    #[test]
    fn test_star_takes_remainder() {
        let defs = [GridDefinition::fixed(50.0), GridDefinition::star(1.0), GridDefinition::auto()];
        let resolved = resolve_tracks(&defs, &[request(2, 1, 30.0)], 200.0);
        assert_eq!(resolved.sizes, vec![50.0, 120.0, 30.0]);
    }

    #[test]
    fn test_star_min_pins_and_redistributes() {
        let defs = [
            GridDefinition::star(1.0).with_limits(80.0, f32::INFINITY),
            GridDefinition::star(1.0),
            GridDefinition::star(1.0),
        ];
        let resolved = resolve_tracks(&defs, &[], 150.0);
        assert_eq!(resolved.sizes, vec![80.0, 35.0, 35.0]);
        assert_eq!(resolved.star_passes, 2);
    }

    #[test]
    fn test_star_max_pins_and_redistributes() {
        let defs = [GridDefinition::star(1.0).with_limits(0.0, 20.0), GridDefinition::star(1.0)];
        let resolved = resolve_tracks(&defs, &[], 100.0);
        assert_eq!(resolved.sizes, vec![20.0, 80.0]);
        assert!(resolved.star_passes <= 2);
    }

    #[test]
    fn test_star_cap_releases_space_to_floored_sibling() {
        let defs = [
            GridDefinition::star(1.0).with_limits(0.0, 10.0),
            GridDefinition::star(1.0).with_limits(60.0, f32::INFINITY),
        ];
        let resolved = resolve_tracks(&defs, &[], 100.0);
        assert_eq!(resolved.sizes, vec![10.0, 90.0]);
        assert_eq!(resolved.total(), 100.0);
        assert!(resolved.star_passes <= 2);
    }

    #[test]
    fn test_star_floor_wins_over_capped_sibling() {
        let defs = [
            GridDefinition::star(1.0).with_limits(0.0, 40.0),
            GridDefinition::star(1.0).with_limits(70.0, f32::INFINITY),
            GridDefinition::star(2.0),
        ];
        // First pass lifts the middle track 45 above its proposal, so it freezes.
        let resolved = resolve_tracks(&defs, &[], 100.0);
        assert_eq!(resolved.sizes, vec![10.0, 70.0, 20.0]);
        assert_eq!(resolved.total(), 100.0);
    }

    #[test]
    fn test_star_balanced_clamps_settle_in_one_pass() {
        let defs = [
            GridDefinition::star(1.0).with_limits(0.0, 40.0),
            GridDefinition::star(1.0).with_limits(60.0, f32::INFINITY),
        ];
        let resolved = resolve_tracks(&defs, &[], 100.0);
        assert_eq!(resolved.sizes, vec![40.0, 60.0]);
        assert_eq!(resolved.star_passes, 1);
    }

    #[test]
    fn test_star_without_room_stays_at_floor() {
        let defs = [GridDefinition::fixed(120.0), GridDefinition::star(1.0).with_limits(5.0, f32::INFINITY)];
        let resolved = resolve_tracks(&defs, &[], 100.0);
        assert_eq!(resolved.sizes, vec![120.0, 5.0]);
        assert_eq!(resolved.star_passes, 0);
    }

    #[test]
    fn test_unbounded_star_sizes_like_auto() {
        let defs = [GridDefinition::star(1.0), GridDefinition::star(2.0)];
        let resolved = resolve_tracks(&defs, &[request(0, 1, 12.0)], f32::INFINITY);
        assert_eq!(resolved.sizes, vec![12.0, 0.0]);
    }

    #[test]
    fn test_pass_count_bounded_by_star_tracks() {
        let defs: Vec<GridDefinition> = (1..=6)
            .map(|i| GridDefinition::star(i as f32).with_limits(i as f32 * 12.0, f32::INFINITY))
            .collect();
        let resolved = resolve_tracks(&defs, &[], 150.0);
        assert!(resolved.star_passes <= defs.len());
        assert!(resolved.sizes.iter().zip(&defs).all(|(size, def)| *size >= def.min_size));
    }

    #[test]
    fn test_offsets() {
        let resolution = TrackResolution { sizes: vec![10.0, 20.0, 30.0], star_passes: 0 };
        assert_eq!(resolution.offsets(), vec![0.0, 10.0, 30.0, 60.0]);
    }
}
