//! Play queue with an original and an active (possibly shuffled) order

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::track::Track;

/// Drop repeated track ids, keeping the first occurrence and the input order.
pub fn dedup_tracks(tracks: &[Track]) -> Vec<Track> {
    let mut seen = HashSet::with_capacity(tracks.len());
    tracks
        .iter()
        .filter(|t| seen.insert(t.id.as_str()))
        .cloned()
        .collect()
}

/// Ordered tracks available for sequential playback.
///
/// `active` is always a permutation of `original` and neither holds duplicate ids.
#[derive(Clone, Debug, Default)]
pub struct Queue {
    original: Vec<Track>,
    active: Vec<Track>,
}

impl Queue {
    /// Build a queue from `tracks` (de-duplicated), shuffling the active order when asked.
    pub fn build<R: Rng + ?Sized>(tracks: &[Track], shuffled: bool, rng: &mut R) -> Self {
        let original = dedup_tracks(tracks);
        let mut queue = Self {
            active: original.clone(),
            original,
        };
        if shuffled {
            queue.reshuffle(rng);
        }
        queue
    }

    /// Replace the active order with a fresh uniform permutation of the original order.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut active = self.original.clone();
        active.shuffle(rng);
        self.active = active;
    }

    /// Restore the active order to the original order.
    pub fn unshuffle(&mut self) {
        self.active = self.original.clone();
    }

    #[cfg(test)]
    pub fn original(&self) -> &[Track] {
        &self.original
    }

    pub fn active(&self) -> &[Track] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.active.get(index)
    }

    /// Position of the track with `id` in the active order.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.active.iter().position(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::track::test_track;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ids(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn dedup_keeps_first_occurrence_in_order() {
        let tracks = vec![test_track("a"), test_track("b"), test_track("a"), test_track("c"), test_track("b")];
        assert_eq!(ids(&dedup_tracks(&tracks)), vec!["a", "b", "c"]);
    }

    #[test]
    fn unshuffled_build_preserves_input_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let tracks = vec![test_track("a"), test_track("b"), test_track("c")];
        let queue = Queue::build(&tracks, false, &mut rng);
        assert_eq!(ids(queue.active()), vec!["a", "b", "c"]);
        assert_eq!(ids(queue.original()), vec!["a", "b", "c"]);
    }

    #[test]
    fn shuffled_build_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let tracks: Vec<Track> = (0..20).map(|i| test_track(&i.to_string())).collect();
        let queue = Queue::build(&tracks, true, &mut rng);

        let mut active = ids(queue.active());
        let mut original = ids(queue.original());
        assert_eq!(active.len(), original.len());
        active.sort_unstable();
        original.sort_unstable();
        assert_eq!(active, original);
    }

    #[test]
    fn unshuffle_restores_original() {
        let mut rng = StdRng::seed_from_u64(3);
        let tracks: Vec<Track> = (0..8).map(|i| test_track(&i.to_string())).collect();
        let mut queue = Queue::build(&tracks, true, &mut rng);
        queue.unshuffle();
        assert_eq!(ids(queue.active()), ids(&tracks));
    }

    #[test]
    fn shuffle_has_no_position_bias() {
        const TRIALS: usize = 24_000;
        let mut rng = StdRng::seed_from_u64(42);
        let tracks: Vec<Track> = (0..4).map(|i| test_track(&i.to_string())).collect();
        let mut queue = Queue::build(&tracks, false, &mut rng);

        // counts[track][position]
        let mut counts = [[0usize; 4]; 4];
        for _ in 0..TRIALS {
            queue.reshuffle(&mut rng);
            for (pos, track) in queue.active().iter().enumerate() {
                let idx: usize = track.id.parse().unwrap();
                counts[idx][pos] += 1;
            }
        }

        let expected = TRIALS / 4;
        let tolerance = expected / 10;
        for row in counts {
            for count in row {
                assert!(
                    count.abs_diff(expected) < tolerance,
                    "count {count} too far from {expected}"
                );
            }
        }
    }

    #[test]
    fn empty_input_gives_empty_queue() {
        let mut rng = StdRng::seed_from_u64(0);
        let queue = Queue::build(&[], true, &mut rng);
        assert!(queue.is_empty());
        assert_eq!(queue.position_of("a"), None);
    }
}
