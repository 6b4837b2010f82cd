//! The six axis-aligned faces of a voxel, in meshing order.

/// One of the six faces of a voxel.
///
/// The discriminant is the face index used by the sprite table and is also
/// the order in which the mesher tests neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FaceDirection {
    /// −X.
    Left = 0,
    /// +X.
    Right = 1,
    /// −Y.
    Bottom = 2,
    /// +Y.
    Top = 3,
    /// −Z.
    Back = 4,
    /// +Z.
    Front = 5,
}

impl FaceDirection {
    /// All six faces in meshing order.
    pub const ALL: [FaceDirection; 6] = [
        Self::Left,
        Self::Right,
        Self::Bottom,
        Self::Top,
        Self::Back,
        Self::Front,
    ];

    /// Outward unit normal.
    pub fn normal(self) -> [f32; 3] {
        match self {
            Self::Left => [-1.0, 0.0, 0.0],
            Self::Right => [1.0, 0.0, 0.0],
            Self::Bottom => [0.0, -1.0, 0.0],
            Self::Top => [0.0, 1.0, 0.0],
            Self::Back => [0.0, 0.0, -1.0],
            Self::Front => [0.0, 0.0, 1.0],
        }
    }

    /// Neighbor offset `(dx, dy, dz)` across this face.
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Self::Left => (-1, 0, 0),
            Self::Right => (1, 0, 0),
            Self::Bottom => (0, -1, 0),
            Self::Top => (0, 1, 0),
            Self::Back => (0, 0, -1),
            Self::Front => (0, 0, 1),
        }
    }

    /// Neighbor of an interior cell across this face.
    ///
    /// The cell must not lie on the grid's outer shell.
    #[inline]
    pub fn neighbor(self, x: usize, y: usize, z: usize) -> (usize, usize, usize) {
        match self {
            Self::Left => (x - 1, y, z),
            Self::Right => (x + 1, y, z),
            Self::Bottom => (x, y - 1, z),
            Self::Top => (x, y + 1, z),
            Self::Back => (x, y, z - 1),
            Self::Front => (x, y, z + 1),
        }
    }

    /// The face on the other side.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Top => Self::Bottom,
            Self::Back => Self::Front,
            Self::Front => Self::Back,
        }
    }

    /// Face index (0–5).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit-cube corners of this face, in emission order.
    ///
    /// The first corner is the voxel origin projected onto the face plane;
    /// the second steps along one in-plane axis, the third is the diagonal
    /// and the fourth steps along the other axis.
    pub fn corners(self) -> [[f32; 3]; 4] {
        match self {
            Self::Left => [[0., 0., 0.], [0., 0., 1.], [0., 1., 1.], [0., 1., 0.]],
            Self::Right => [[1., 0., 0.], [1., 0., 1.], [1., 1., 1.], [1., 1., 0.]],
            Self::Bottom => [[0., 0., 0.], [0., 0., 1.], [1., 0., 1.], [1., 0., 0.]],
            Self::Top => [[0., 1., 0.], [0., 1., 1.], [1., 1., 1.], [1., 1., 0.]],
            Self::Back => [[0., 0., 0.], [0., 1., 0.], [1., 1., 0.], [1., 0., 0.]],
            Self::Front => [[0., 0., 1.], [0., 1., 1.], [1., 1., 1.], [1., 0., 1.]],
        }
    }

    /// Texture coordinates matching [`corners`](Self::corners).
    pub fn uvs(self) -> [[f32; 2]; 4] {
        match self {
            Self::Left | Self::Right => [[0., 0.], [1., 0.], [1., 1.], [0., 1.]],
            Self::Bottom | Self::Top | Self::Back | Self::Front => {
                [[0., 0.], [0., 1.], [1., 1.], [1., 0.]]
            }
        }
    }

    /// Recovers a face from its outward normal.
    pub fn from_normal(normal: [f32; 3]) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.normal() == normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_matches_index() {
        for (i, dir) in FaceDirection::ALL.iter().enumerate() {
            assert_eq!(dir.index(), i);
        }
    }

    #[test]
    fn test_opposite_is_involution() {
        for dir in FaceDirection::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn test_corners_lie_on_face_plane() {
        for dir in FaceDirection::ALL {
            let n = dir.normal();
            let axis = n.iter().position(|c| *c != 0.0).unwrap();
            let plane = if n[axis] > 0.0 { 1.0 } else { 0.0 };
            for corner in dir.corners() {
                assert_eq!(corner[axis], plane, "{dir:?} corner {corner:?} off plane");
            }
        }
    }

    #[test]
    fn test_third_corner_is_diagonal() {
        for dir in FaceDirection::ALL {
            let c = dir.corners();
            let diff: f32 = (0..3).map(|a| (c[2][a] - c[0][a]).abs()).sum();
            assert_eq!(diff, 2.0, "{dir:?} corner 2 is not opposite corner 0");
        }
    }

    #[test]
    fn test_delta_matches_normal() {
        for dir in FaceDirection::ALL {
            let (dx, dy, dz) = dir.delta();
            assert_eq!([dx as f32, dy as f32, dz as f32], dir.normal());
            assert_eq!(FaceDirection::from_normal(dir.normal()), Some(dir));
        }
    }
}
