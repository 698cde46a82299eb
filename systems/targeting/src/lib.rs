#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure targeting and collision rules shared by every combat entity.
//!
//! All functions operate on footprints listed in the opposing group's
//! iteration order, which the world keeps equal to spawn order. Whenever
//! several candidates tie, the first one encountered wins, so replays with
//! the same spawn order always pick the same targets.

use glam::Vec2;
use storm_castle_core::Rect;

/// Closest opposing footprint found by [`nearest`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nearest {
    /// Position of the candidate within the scanned group.
    pub index: usize,
    /// Centre of the candidate.
    pub center: Vec2,
    /// Euclidean distance between the two centres.
    pub distance: f32,
}

/// Movement decision for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Approach {
    /// Nothing to walk toward, or already standing on the target's centre.
    Idle,
    /// An opponent is already colliding or within attack range.
    Blocked,
    /// Walk to the provided centre.
    Step(Vec2),
}

/// Finds the footprint whose centre is closest to `origin`.
///
/// Returns `None` for an empty group. Ties keep the earliest candidate.
#[must_use]
pub fn nearest(origin: Vec2, candidates: &[Rect]) -> Option<Nearest> {
    let mut best: Option<Nearest> = None;
    for (index, rect) in candidates.iter().enumerate() {
        let center = rect.center();
        let distance = origin.distance(center);
        let closer = match &best {
            Some(existing) => distance < existing.distance,
            None => true,
        };
        if closer {
            best = Some(Nearest {
                index,
                center,
                distance,
            });
        }
    }
    best
}

/// Reports whether `other` can be struck by an attacker occupying `subject`.
///
/// A target is in range when the footprints overlap or when the centres are
/// strictly closer than `attack_range`.
#[must_use]
pub fn in_range(subject: &Rect, attack_range: f32, other: &Rect) -> bool {
    subject.intersects(other) || subject.center().distance(other.center()) < attack_range
}

/// Reports whether any candidate is in range of `subject`.
#[must_use]
pub fn any_in_range(subject: &Rect, attack_range: f32, candidates: &[Rect]) -> bool {
    candidates
        .iter()
        .any(|candidate| in_range(subject, attack_range, candidate))
}

/// Collects the indices of every candidate in range, preserving group order.
///
/// The output buffer is cleared before populating it.
pub fn collect_in_range(
    subject: &Rect,
    attack_range: f32,
    candidates: &[Rect],
    out: &mut Vec<usize>,
) {
    out.clear();
    out.extend(
        candidates
            .iter()
            .enumerate()
            .filter(|(_, candidate)| in_range(subject, attack_range, candidate))
            .map(|(index, _)| index),
    );
}

/// Narrows the in-range candidates to the ones an attack damages.
///
/// Area-effect attacks hit every candidate; others hit only the first.
#[must_use]
pub fn victims(in_range: &[usize], area_effect: bool) -> &[usize] {
    if area_effect {
        in_range
    } else {
        &in_range[..in_range.len().min(1)]
    }
}

/// Moves `from` by `speed` along the straight line toward `to`.
///
/// Returns `None` when both points coincide, since there is no direction to
/// normalise.
#[must_use]
pub fn step_toward(from: Vec2, to: Vec2, speed: f32) -> Option<Vec2> {
    let offset = to - from;
    if offset == Vec2::ZERO {
        return None;
    }
    Some(from + offset.normalize() * speed)
}

/// Decides how a walker occupying `subject` moves this tick.
#[must_use]
pub fn approach(subject: &Rect, attack_range: f32, speed: f32, opponents: &[Rect]) -> Approach {
    let origin = subject.center();
    let Some(target) = nearest(origin, opponents) else {
        return Approach::Idle;
    };

    if any_in_range(subject, attack_range, opponents) {
        return Approach::Blocked;
    }

    match step_toward(origin, target.center, speed) {
        Some(next) => Approach::Step(next),
        None => Approach::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storm_castle_core::SPRITE_SIZE;

    fn sprite(x: f32, y: f32) -> Rect {
        Rect::from_center(Vec2::new(x, y), SPRITE_SIZE)
    }

    #[test]
    fn nearest_picks_smallest_distance() {
        let group = [sprite(400.0, 100.0), sprite(120.0, 100.0), sprite(300.0, 300.0)];
        let found = nearest(Vec2::new(100.0, 100.0), &group).expect("non-empty group");
        assert_eq!(found.index, 1);
        assert_eq!(found.distance, 20.0);
    }

    #[test]
    fn nearest_keeps_first_of_equal_candidates() {
        let group = [sprite(200.0, 100.0), sprite(0.0, 100.0), sprite(100.0, 200.0)];
        let found = nearest(Vec2::new(100.0, 100.0), &group).expect("non-empty group");
        assert_eq!(found.index, 0);
    }

    #[test]
    fn nearest_of_empty_group_is_none() {
        assert_eq!(nearest(Vec2::ZERO, &[]), None);
    }

    #[test]
    fn overlap_counts_as_in_range_without_reach() {
        let subject = sprite(100.0, 100.0);
        assert!(in_range(&subject, 0.0, &sprite(150.0, 100.0)));
        assert!(!in_range(&subject, 0.0, &sprite(164.0, 100.0)));
    }

    #[test]
    fn reach_is_strict_center_distance() {
        let subject = sprite(100.0, 100.0);
        assert!(in_range(&subject, 160.0, &sprite(259.0, 100.0)));
        assert!(!in_range(&subject, 160.0, &sprite(260.0, 100.0)));
    }

    #[test]
    fn collect_preserves_group_order_and_clears_buffer() {
        let subject = sprite(100.0, 100.0);
        let group = [sprite(500.0, 500.0), sprite(150.0, 120.0), sprite(90.0, 90.0)];
        let mut out = vec![42];
        collect_in_range(&subject, 0.0, &group, &mut out);
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn single_target_attacks_hit_first_candidate_only() {
        let found = [3, 5, 8];
        assert_eq!(victims(&found, false), &[3]);
        assert_eq!(victims(&found, true), &[3, 5, 8]);
        assert!(victims(&[], false).is_empty());
    }

    #[test]
    fn step_moves_exactly_speed_units() {
        let next = step_toward(Vec2::ZERO, Vec2::new(30.0, 40.0), 5.0).expect("distinct points");
        assert!((next - Vec2::new(3.0, 4.0)).length() < 1e-5);
        assert_eq!(step_toward(Vec2::ONE, Vec2::ONE, 5.0), None);
    }

    #[test]
    fn approach_stops_when_blocked() {
        let subject = sprite(100.0, 100.0);
        let opponents = [sprite(400.0, 100.0), sprite(140.0, 100.0)];
        assert_eq!(approach(&subject, 0.0, 5.0, &opponents), Approach::Blocked);
    }

    #[test]
    fn ranged_walker_stops_at_reach() {
        let subject = sprite(100.0, 100.0);
        let opponents = [sprite(250.0, 100.0)];
        assert_eq!(approach(&subject, 160.0, 6.0, &opponents), Approach::Blocked);
        assert_eq!(
            approach(&subject, 0.0, 6.0, &opponents),
            Approach::Step(Vec2::new(106.0, 100.0))
        );
    }

    #[test]
    fn approach_idles_without_opponents() {
        assert_eq!(approach(&sprite(0.0, 0.0), 0.0, 5.0, &[]), Approach::Idle);
    }
}
