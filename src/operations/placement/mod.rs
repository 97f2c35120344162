mod occupancy;
mod place_bricks;

pub use occupancy::OccupancyIndex;
pub use place_bricks::{PlaceBricks, PlacementReport, Rejection};
