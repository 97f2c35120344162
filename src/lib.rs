pub mod error;
pub mod math;
pub mod model;
pub mod operations;
pub mod params;
pub mod records;

pub use error::{BrickworkError, Result};
pub use model::{BoundingBox, Brick, BrickRequest, Layer, Shape, ShapeGeometry, Voxel, VoxelSet, MAX_UNSPLIT};
pub use operations::packing::PackBricks;
pub use operations::pipeline::{BuildModel, ModelOutput, ModelStats};
pub use operations::placement::{OccupancyIndex, PlaceBricks, PlacementReport};
pub use operations::raster::Rasterize;
pub use operations::symmetry::{EnforceSymmetry, SymmetryAxes};
pub use params::BuildParams;
