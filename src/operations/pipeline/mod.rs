mod build_model;

pub use build_model::{BuildModel, ModelOutput, ModelStats};
