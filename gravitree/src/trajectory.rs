use std::collections::VecDeque;

use glam::DVec2;

use crate::body::{BodyID, Position};

/// Bounded history of the positions of a body, oldest first.
///
/// Pushing onto a full trajectory evicts its oldest point in constant time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    points: VecDeque<DVec2>,
    capacity: usize,
}

impl Trajectory {
    /// Creates a new empty [`Trajectory`] holding at most `capacity` points.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a point, evicting the oldest one if the trajectory is full.
    ///
    /// A trajectory with a capacity of zero stays empty.
    pub fn push(&mut self, point: DVec2) {
        if self.capacity == 0 {
            return;
        }

        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Maximum number of points.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of points currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no point was recorded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent point.
    #[inline]
    pub fn last(&self) -> Option<DVec2> {
        self.points.back().copied()
    }

    /// Iterates over the points in chronological order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = DVec2> + '_ {
        self.points.iter().copied()
    }
}

/// Samples the positions of bodies into [`Trajectory`]s every `interval` frames.
#[derive(Clone, Debug)]
pub struct TrajectoryRecorder {
    capacity: usize,
    interval: u64,
    tracked: Option<Vec<BodyID>>,
    trajectories: Vec<(BodyID, Trajectory)>,
}

impl TrajectoryRecorder {
    /// Creates a new [`TrajectoryRecorder`].
    ///
    /// If `tracked` is `None`, every body of the first recorded slice is tracked. Otherwise only
    /// the listed bodies are, and ids past the end of the slice are ignored.
    pub fn new(capacity: usize, interval: u64, tracked: Option<Vec<BodyID>>) -> Self {
        let tracked = tracked.map(|mut ids| {
            ids.sort_unstable();
            ids.dedup();
            ids
        });

        Self {
            capacity,
            interval,
            tracked,
            trajectories: Vec::new(),
        }
    }

    /// Records the position of every tracked body if `frame` is a multiple of the interval.
    ///
    /// Returns true if a sample was taken.
    pub fn record<P: Position>(&mut self, frame: u64, bodies: &[P]) -> bool {
        if self.interval == 0 || frame % self.interval != 0 {
            return false;
        }

        if self.trajectories.is_empty() {
            let capacity = self.capacity;
            let new = |id| (id, Trajectory::new(capacity));

            self.trajectories = match &self.tracked {
                Some(ids) => ids.iter().copied().map(new).collect(),
                None => (0..bodies.len()).map(new).collect(),
            };
        }

        for (id, trajectory) in &mut self.trajectories {
            if let Some(body) = bodies.get(*id) {
                trajectory.push(body.position());
            }
        }

        true
    }

    /// Returns the trajectory of body `id`, if it is tracked and was sampled at least once.
    pub fn get(&self, id: BodyID) -> Option<&Trajectory> {
        self.trajectories
            .binary_search_by_key(&id, |(id, _)| *id)
            .ok()
            .map(|i| &self.trajectories[i].1)
    }

    /// Iterates over the tracked bodies and their trajectories, by increasing id.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (BodyID, &Trajectory)> {
        self.trajectories.iter().map(|(id, t)| (*id, t))
    }

    /// Forgets every recorded point.
    #[inline]
    pub fn clear(&mut self) {
        self.trajectories.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest() {
        let mut trajectory = Trajectory::new(3);
        for i in 0..5 {
            trajectory.push(DVec2::splat(i as f64));
        }

        assert_eq!(trajectory.len(), 3);
        assert_eq!(
            trajectory.iter().collect::<Vec<_>>(),
            [DVec2::splat(2.0), DVec2::splat(3.0), DVec2::splat(4.0)]
        );
        assert_eq!(trajectory.last(), Some(DVec2::splat(4.0)));
    }

    #[test]
    fn zero_capacity() {
        let mut trajectory = Trajectory::new(0);
        trajectory.push(DVec2::ONE);

        assert!(trajectory.is_empty());
    }

    #[test]
    fn samples_every_interval() {
        let bodies = [(DVec2::ZERO, 1.0), (DVec2::ONE, 1.0)];
        let mut recorder = TrajectoryRecorder::new(10, 5, None);

        let sampled: Vec<_> = (0..12).filter(|&f| recorder.record(f, &bodies)).collect();

        assert_eq!(sampled, [0, 5, 10]);
        assert_eq!(recorder.get(0).map(Trajectory::len), Some(3));
        assert_eq!(recorder.get(1).and_then(Trajectory::last), Some(DVec2::ONE));
    }

    #[test]
    fn only_tracked_bodies() {
        let bodies = [(DVec2::ZERO, 1.0), (DVec2::ONE, 1.0), (DVec2::X, 1.0)];
        let mut recorder = TrajectoryRecorder::new(4, 1, Some(vec![2, 0, 2, 9]));
        recorder.record(0, &bodies);

        assert_eq!(recorder.iter().map(|(id, _)| id).collect::<Vec<_>>(), [0, 2, 9]);
        assert!(recorder.get(1).is_none());
        assert_eq!(recorder.get(2).and_then(Trajectory::last), Some(DVec2::X));
        assert!(recorder.get(9).is_some_and(Trajectory::is_empty));
    }
}
