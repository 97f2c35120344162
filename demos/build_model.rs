//! Builds a small model from a JSON request and prints the placed bricks.
//!
//! ```text
//! cargo run --example build_model
//! RUST_LOG=brickwork=trace cargo run --example build_model
//! ```

use brickwork::records::ModelRequest;
use brickwork::{BuildModel, BuildParams, BrickworkError};

const REQUEST: &str = r#"{
    "boundingBox": {"width": 16, "depth": 12, "heightPlates": 6},
    "symmetry": true,
    "layers": [
        {
            "yMin": 0, "yMax": 2,
            "shapes": [{"type": "oval", "centerX": 8, "centerZ": 6, "radiusX": 6, "radiusZ": 4, "color": "brown"}],
            "holes": [{"type": "circle", "centerX": 8, "centerZ": 6, "radius": 2}]
        },
        {
            "yMin": 2, "yMax": 5,
            "shapes": [
                {"type": "rect", "x": 2, "z": 3, "width": 5, "depth": 6, "color": "red"},
                {"type": "polygon", "points": [[3, 4], [6, 4], [4.5, 8]], "color": "yellow"}
            ]
        }
    ]
}"#;

fn main() -> Result<(), BrickworkError> {
    // Default: WARN for everything, INFO for brickwork.
    // Override with RUST_LOG env var (e.g. RUST_LOG=brickwork=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("brickwork=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let request = ModelRequest::from_json(REQUEST)?;
    let output = BuildModel::from_request(request, BuildParams::default()).execute();

    println!("{}", output.placement.summary());
    println!("{}", serde_json::to_string_pretty(&output.stats())?);
    for brick in output.bricks() {
        println!(
            "{}x{} at ({}, {}, {}) {}",
            brick.width, brick.depth, brick.x, brick.y, brick.z, brick.color
        );
    }
    Ok(())
}
