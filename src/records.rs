//! Loosely typed records exchanged with the surrounding application.
//!
//! The generative model emits layers and shapes as JSON objects tagged by a
//! `type` field. These records mirror that shape and convert into the closed
//! domain types. Unknown tags fail loudly so geometry is never dropped
//! silently.

use serde::{Deserialize, Serialize};

use crate::error::{PlacementError, RasterError, Result};
use crate::math::Point2;
use crate::model::{BoundingBox, BrickRequest, Layer, Shape, ShapeGeometry};
use crate::operations::symmetry::SymmetryAxes;

/// Color used when a record omits one.
pub const DEFAULT_COLOR: &str = "gray";

/// A `type`-tagged shape as emitted by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub x: Option<f64>,
    pub z: Option<f64>,
    pub width: Option<f64>,
    pub depth: Option<f64>,
    pub center_x: Option<f64>,
    pub center_z: Option<f64>,
    pub radius: Option<f64>,
    pub radius_x: Option<f64>,
    pub radius_z: Option<f64>,
    pub points: Option<Vec<[f64; 2]>>,
    pub color: Option<String>,
}

impl ShapeRecord {
    /// Converts the record into shape geometry, ignoring its color.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::UnsupportedShapeKind` for an unknown `type` and
    /// `RasterError::MissingField` if a required field is absent.
    pub fn to_geometry(&self) -> std::result::Result<ShapeGeometry, RasterError> {
        match self.kind.to_ascii_lowercase().as_str() {
            "rect" | "rectangle" => Ok(ShapeGeometry::Rect {
                x: require("rect", "x", self.x)?,
                z: require("rect", "z", self.z)?,
                width: require("rect", "width", self.width)?,
                depth: require("rect", "depth", self.depth)?,
            }),
            "circle" => Ok(ShapeGeometry::Circle {
                center_x: require("circle", "centerX", self.center_x)?,
                center_z: require("circle", "centerZ", self.center_z)?,
                radius: require("circle", "radius", self.radius)?,
            }),
            "oval" | "ellipse" => Ok(ShapeGeometry::Oval {
                center_x: require("oval", "centerX", self.center_x)?,
                center_z: require("oval", "centerZ", self.center_z)?,
                radius_x: require("oval", "radiusX", self.radius_x)?,
                radius_z: require("oval", "radiusZ", self.radius_z)?,
            }),
            "polygon" => {
                let points = self.points.as_ref().ok_or(RasterError::MissingField {
                    kind: "polygon",
                    field: "points",
                })?;
                Ok(ShapeGeometry::Polygon {
                    points: points.iter().map(|[x, z]| Point2::new(*x, *z)).collect(),
                })
            }
            _ => Err(RasterError::UnsupportedShapeKind(self.kind.clone())),
        }
    }

    /// Converts the record into a colored shape.
    ///
    /// # Errors
    ///
    /// See [`ShapeRecord::to_geometry`].
    pub fn to_shape(&self) -> std::result::Result<Shape, RasterError> {
        let color = self.color.as_deref().unwrap_or(DEFAULT_COLOR);
        Ok(Shape::new(self.to_geometry()?, color))
    }
}

fn require(kind: &'static str, field: &'static str, value: Option<f64>) -> std::result::Result<f64, RasterError> {
    value.ok_or(RasterError::MissingField { kind, field })
}

/// A layer record covering `[yMin, yMax)` plates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerRecord {
    #[serde(alias = "yMinPlates")]
    pub y_min: i32,
    #[serde(alias = "yMaxPlates")]
    pub y_max: i32,
    #[serde(default)]
    pub shapes: Vec<ShapeRecord>,
    #[serde(default)]
    pub holes: Vec<ShapeRecord>,
}

impl LayerRecord {
    /// Converts the record into a [`Layer`].
    ///
    /// # Errors
    ///
    /// Fails on the first shape or hole that does not convert.
    pub fn to_layer(&self) -> std::result::Result<Layer, RasterError> {
        Ok(Layer {
            y_min_plates: self.y_min,
            y_max_plates: self.y_max,
            shapes: self
                .shapes
                .iter()
                .map(ShapeRecord::to_shape)
                .collect::<std::result::Result<_, _>>()?,
            holes: self
                .holes
                .iter()
                .map(ShapeRecord::to_geometry)
                .collect::<std::result::Result<_, _>>()?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelRecord {
    bounding_box: BoundingBox,
    #[serde(default)]
    layers: Vec<LayerRecord>,
    #[serde(default)]
    symmetry: SymmetryAxes,
}

/// A typed request for the voxel pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub bounding_box: BoundingBox,
    pub layers: Vec<Layer>,
    pub symmetry: SymmetryAxes,
}

impl ModelRequest {
    /// Parses a request of the form
    /// `{"boundingBox": {..}, "layers": [..], "symmetry": ..}`.
    ///
    /// # Errors
    ///
    /// Returns `BrickworkError::Json` for malformed JSON (including an
    /// unresolved `auto` symmetry) and `BrickworkError::Raster` for shapes
    /// that do not convert.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: ModelRecord = serde_json::from_str(json)?;
        let layers = record
            .layers
            .iter()
            .map(LayerRecord::to_layer)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            bounding_box: record.bounding_box,
            layers,
            symmetry: record.symmetry,
        })
    }
}

/// A placement candidate as emitted by the model, with untrusted numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickRecord {
    pub width: f64,
    pub depth: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub color: Option<String>,
}

impl BrickRecord {
    /// Converts the record into a typed candidate.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError::NonIntegral` naming the first field that is
    /// not a finite integer in `i32` range.
    pub fn to_request(&self) -> std::result::Result<BrickRequest, PlacementError> {
        Ok(BrickRequest {
            width: integral("width", self.width)?,
            depth: integral("depth", self.depth)?,
            x: integral("x", self.x)?,
            y: integral("y", self.y)?,
            z: integral("z", self.z)?,
            color: self.color.clone().unwrap_or_else(|| DEFAULT_COLOR.to_owned()),
        })
    }
}

#[allow(clippy::cast_possible_truncation)]
fn integral(field: &'static str, value: f64) -> std::result::Result<i32, PlacementError> {
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    if value.is_finite() && value.fract() == 0.0 && in_range {
        Ok(value as i32)
    } else {
        Err(PlacementError::NonIntegral { field })
    }
}
