use crate::constants::{LANDMARK_COUNT, PALM_CENTER, WRIST};
use crate::error::LandmarkError;
use glam::{Vec2, Vec3};

/// One detected hand: 21 normalized image-plane points (x, y in \[0, 1\], z relative depth).
///
/// Produced fresh every video frame by the hand tracker and dropped after
/// classification.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    points: [Vec3; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Vec3; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from a tracker result, rejecting partial or non-finite skeletons.
    pub fn from_points(points: &[Vec3]) -> Result<Self, LandmarkError> {
        if points.len() != LANDMARK_COUNT {
            return Err(LandmarkError::WrongCount {
                expected: LANDMARK_COUNT,
                got: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(LandmarkError::NotFinite { index });
        }
        let mut out = [Vec3::ZERO; LANDMARK_COUNT];
        out.copy_from_slice(points);
        Ok(Self { points: out })
    }

    #[inline]
    pub fn point(&self, index: usize) -> Vec3 {
        self.points[index]
    }

    /// Point projected onto the normalized image plane.
    #[inline]
    pub fn planar(&self, index: usize) -> Vec2 {
        self.points[index].truncate()
    }

    #[inline]
    pub fn wrist(&self) -> Vec2 {
        self.planar(WRIST)
    }

    #[inline]
    pub fn palm_center(&self) -> Vec2 {
        self.planar(PALM_CENTER)
    }

    pub fn points(&self) -> &[Vec3; LANDMARK_COUNT] {
        &self.points
    }
}
