use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info_span};

use crate::model::{BoundingBox, Brick, BrickRequest, Layer, VoxelSet};
use crate::operations::packing::PackBricks;
use crate::operations::placement::{PlaceBricks, PlacementReport};
use crate::operations::raster::Rasterize;
use crate::operations::symmetry::EnforceSymmetry;
use crate::params::BuildParams;
use crate::records::ModelRequest;

/// Artifacts produced by every stage of [`BuildModel`].
#[derive(Debug, Clone)]
pub struct ModelOutput {
    /// Rasterized voxels after symmetry enforcement.
    pub voxels: VoxelSet,
    /// Bricks as packed, before physical placement.
    pub packed: Vec<Brick>,
    pub placement: PlacementReport,
}

/// Summary counts for a built model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStats {
    pub voxel_count: usize,
    pub packed_count: usize,
    pub placed_count: usize,
    pub rejected_count: usize,
    /// Placed bricks per color, in color order.
    pub bricks_per_color: BTreeMap<String, usize>,
}

impl ModelOutput {
    /// Final bricks, ready for the scene serializer.
    #[must_use]
    pub fn bricks(&self) -> &[Brick] {
        &self.placement.bricks
    }

    #[must_use]
    pub fn stats(&self) -> ModelStats {
        let mut bricks_per_color = BTreeMap::new();
        for brick in &self.placement.bricks {
            *bricks_per_color.entry(brick.color.clone()).or_insert(0) += 1;
        }
        ModelStats {
            voxel_count: self.voxels.len(),
            packed_count: self.packed.len(),
            placed_count: self.placement.bricks.len(),
            rejected_count: self.placement.rejected_count(),
            bricks_per_color,
        }
    }
}

/// Runs the full voxel pipeline: rasterize, enforce symmetry, pack, place.
///
/// Packed bricks are fed to placement in packing order, so lower layers are
/// committed first and any floating part settles onto what lies beneath it.
#[derive(Debug, Clone)]
pub struct BuildModel {
    bounding_box: BoundingBox,
    layers: Vec<Layer>,
    params: BuildParams,
}

impl BuildModel {
    /// Creates a new `BuildModel` operation with default parameters.
    #[must_use]
    pub fn new(bounding_box: BoundingBox, layers: Vec<Layer>) -> Self {
        Self {
            bounding_box,
            layers,
            params: BuildParams::default(),
        }
    }

    /// Creates the operation from a parsed request. The request's symmetry
    /// overrides the one in `params`.
    #[must_use]
    pub fn from_request(request: ModelRequest, params: BuildParams) -> Self {
        Self {
            bounding_box: request.bounding_box,
            layers: request.layers,
            params: params.with_symmetry(request.symmetry),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: BuildParams) -> Self {
        self.params = params;
        self
    }

    /// Executes every stage and returns their artifacts.
    #[must_use]
    pub fn execute(&self) -> ModelOutput {
        let span = info_span!("build_model", layers = self.layers.len());
        let _guard = span.enter();

        let raw = Rasterize::new(self.bounding_box, self.layers.clone()).execute();
        let voxels = EnforceSymmetry::new(self.bounding_box, self.params.symmetry).execute(&raw);
        let packed = PackBricks::new(&self.params).execute(&voxels);
        let requests: Vec<BrickRequest> = packed.iter().map(BrickRequest::from).collect();
        let placement = PlaceBricks::new(&self.params).execute(&requests);

        debug!(
            voxels = voxels.len(),
            packed = packed.len(),
            placed = placement.bricks.len(),
            "built model"
        );
        ModelOutput {
            voxels,
            packed,
            placement,
        }
    }
}
