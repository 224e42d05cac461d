use gridnav_core::Vec2;

/// Host-side collision query used while building the grid.
pub trait ObstacleSampler {
    /// Whether any obstacle intersects the circle of `radius` around `centre`.
    fn overlaps(&self, centre: Vec2, radius: f32) -> bool;
}

/// Host-side terrain query used while building the grid.
pub trait TerrainClassifier {
    /// Terrain category of the surface under `point`, or `None` when a
    /// downward query from above the point hits nothing classified.
    fn classify(&self, point: Vec2) -> Option<&str>;
}

impl<F> ObstacleSampler for F
where
    F: Fn(Vec2, f32) -> bool,
{
    #[inline]
    fn overlaps(&self, centre: Vec2, radius: f32) -> bool {
        self(centre, radius)
    }
}

impl<F> TerrainClassifier for F
where
    F: Fn(Vec2) -> Option<&'static str>,
{
    #[inline]
    fn classify(&self, point: Vec2) -> Option<&str> {
        self(point)
    }
}

/// Sampler for an obstacle-free world.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoObstacles;

impl ObstacleSampler for NoObstacles {
    #[inline]
    fn overlaps(&self, _centre: Vec2, _radius: f32) -> bool {
        false
    }
}

/// Classifier for a world without terrain categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTerrain;

impl TerrainClassifier for NoTerrain {
    #[inline]
    fn classify(&self, _point: Vec2) -> Option<&str> {
        None
    }
}
