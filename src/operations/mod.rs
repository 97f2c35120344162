pub mod packing;
pub mod pipeline;
pub mod placement;
pub mod raster;
pub mod symmetry;
