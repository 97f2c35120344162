mod pack_bricks;

pub use pack_bricks::PackBricks;
