mod rasterize;

pub use rasterize::Rasterize;
