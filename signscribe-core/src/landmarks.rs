//! Hand landmark geometry in canvas space.
//!
//! The tracker supplies 21 points per hand, normalized into a 400×400 canvas
//! with `y` growing downward. Every geometric predicate in the recognizer is
//! phrased against the fixed indices below.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignscribeError};

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Fingertips of the four non-thumb fingers, index first.
pub const FINGERTIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Middle (PIP) joints of the four non-thumb fingers, index first.
pub const FINGER_PIPS: [usize; 4] = [INDEX_PIP, MIDDLE_PIP, RING_PIP, PINKY_PIP];

/// A single 2D landmark in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The four non-thumb fingers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// `(pip, tip)` landmark indices.
    pub const fn joints(self) -> (usize, usize) {
        match self {
            Finger::Index => (INDEX_PIP, INDEX_TIP),
            Finger::Middle => (MIDDLE_PIP, MIDDLE_TIP),
            Finger::Ring => (RING_PIP, RING_TIP),
            Finger::Pinky => (PINKY_PIP, PINKY_TIP),
        }
    }
}

/// Exactly 21 landmarks of one detected hand.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: [Point; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(points: [Point; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from raw `(x, y)` pairs as delivered by the tracker.
    ///
    /// # Errors
    /// Fails when the slice does not hold exactly 21 points or any coordinate
    /// is NaN/infinite.
    pub fn from_pairs(pairs: &[[f32; 2]]) -> Result<Self> {
        if pairs.len() != LANDMARK_COUNT {
            return Err(SignscribeError::LandmarkCount(pairs.len()));
        }
        let mut points = [Point::default(); LANDMARK_COUNT];
        for (index, (slot, pair)) in points.iter_mut().zip(pairs).enumerate() {
            if !pair[0].is_finite() || !pair[1].is_finite() {
                return Err(SignscribeError::LandmarkNotFinite { index });
            }
            *slot = Point::new(pair[0], pair[1]);
        }
        Ok(Self { points })
    }

    pub fn x(&self, index: usize) -> f32 {
        self.points[index].x
    }

    pub fn y(&self, index: usize) -> f32 {
        self.points[index].y
    }

    pub fn distance(&self, a: usize, b: usize) -> f32 {
        self.points[a].distance(self.points[b])
    }

    /// Tip above its middle joint: the finger is raised.
    pub fn extended(&self, finger: Finger) -> bool {
        let (pip, tip) = finger.joints();
        self.y(pip) > self.y(tip)
    }

    /// Tip below its middle joint: the finger is curled.
    ///
    /// Not the negation of [`extended`](Self::extended): a tip level with its
    /// joint is neither.
    pub fn folded(&self, finger: Finger) -> bool {
        let (pip, tip) = finger.joints();
        self.y(pip) < self.y(tip)
    }

    /// Raised/curled pattern check in index, middle, ring, pinky order.
    /// `true` means extended, `false` means folded.
    pub fn finger_pattern(&self, pattern: [bool; 4]) -> bool {
        Finger::ALL
            .iter()
            .zip(pattern)
            .all(|(&finger, up)| if up { self.extended(finger) } else { self.folded(finger) })
    }

    /// Whether `x` of landmark `index` is strictly greater than `x` of every
    /// landmark in `others`.
    pub fn right_of_all(&self, index: usize, others: &[usize]) -> bool {
        others.iter().all(|&o| self.x(index) > self.x(o))
    }

    /// Whether `x` of landmark `index` is strictly less than `x` of every
    /// landmark in `others`.
    pub fn left_of_all(&self, index: usize, others: &[usize]) -> bool {
        others.iter().all(|&o| self.x(index) < self.x(o))
    }

    /// Whether landmark `index` sits above (smaller `y`) every one of `others`.
    pub fn above_all(&self, index: usize, others: &[usize]) -> bool {
        others.iter().all(|&o| self.y(index) < self.y(o))
    }

    /// Whether landmark `index` sits below (larger `y`) every one of `others`.
    pub fn below_all(&self, index: usize, others: &[usize]) -> bool {
        others.iter().all(|&o| self.y(index) > self.y(o))
    }

    /// Copy with a single landmark moved.
    pub fn with_point(mut self, index: usize, point: Point) -> Self {
        self.points[index] = point;
        self
    }
}

impl TryFrom<&[[f32; 2]]> for LandmarkSet {
    type Error = SignscribeError;

    fn try_from(pairs: &[[f32; 2]]) -> Result<Self> {
        Self::from_pairs(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_pairs() -> Vec<[f32; 2]> {
        (0..LANDMARK_COUNT).map(|i| [i as f32, 2.0 * i as f32]).collect()
    }

    #[test]
    fn rejects_wrong_point_count() {
        let pairs = vec![[0.0, 0.0]; 20];
        let err = LandmarkSet::from_pairs(&pairs).unwrap_err();
        assert!(matches!(err, SignscribeError::LandmarkCount(20)));
    }

    #[test]
    fn rejects_nan_coordinates() {
        let mut pairs = flat_pairs();
        pairs[7][1] = f32::NAN;
        let err = LandmarkSet::from_pairs(&pairs).unwrap_err();
        assert!(matches!(err, SignscribeError::LandmarkNotFinite { index: 7 }));
    }

    #[test]
    fn distance_is_euclidean() {
        let set = LandmarkSet::from_pairs(&flat_pairs()).expect("valid set");
        // (0,0) → (3,6)
        assert_relative_eq!(set.distance(WRIST, THUMB_IP), 45.0f32.sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn level_fingertip_is_neither_extended_nor_folded() {
        let set = LandmarkSet::from_pairs(&flat_pairs())
            .expect("valid set")
            .with_point(INDEX_PIP, Point::new(10.0, 100.0))
            .with_point(INDEX_TIP, Point::new(10.0, 100.0));
        assert!(!set.extended(Finger::Index));
        assert!(!set.folded(Finger::Index));
    }

    #[test]
    fn finger_pattern_checks_each_finger() {
        // y grows with index in flat_pairs, so every tip is below its pip.
        let set = LandmarkSet::from_pairs(&flat_pairs()).expect("valid set");
        assert!(set.finger_pattern([false, false, false, false]));
        assert!(!set.finger_pattern([true, false, false, false]));
    }
}
