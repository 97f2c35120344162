use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use super::OccupancyIndex;
use crate::error::PlacementError;
use crate::model::brick::footprint_cells;
use crate::model::{Brick, BrickRequest};
use crate::params::BuildParams;
use crate::records::BrickRecord;

/// A candidate that could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Position of the candidate in the input stream.
    pub index: usize,
    #[serde(serialize_with = "serialize_display")]
    pub error: PlacementError,
}

fn serialize_display<S: Serializer>(error: &PlacementError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Result of one placement run.
///
/// Placement is best-effort: rejected candidates are listed alongside the
/// bricks that were placed. A candidate split into several pieces yields
/// several bricks.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlacementReport {
    pub bricks: Vec<Brick>,
    pub rejections: Vec<Rejection>,
    /// Number of candidates in the input stream.
    pub requested: usize,
    #[serde(skip)]
    pub occupancy: OccupancyIndex,
}

impl PlacementReport {
    /// Number of candidates that produced bricks.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.requested - self.rejections.len()
    }

    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.rejections.len()
    }

    /// Returns `true` if every candidate was placed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rejections.is_empty()
    }

    /// One-line summary suitable for surfacing partial failures.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_complete() {
            format!("placed {} of {} candidates", self.placed_count(), self.requested)
        } else {
            format!(
                "placed {} of {} candidates ({} rejected)",
                self.placed_count(),
                self.requested,
                self.rejected_count()
            )
        }
    }
}

/// A footprint piece waiting to be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Piece {
    x: i32,
    z: i32,
    width: u32,
    depth: u32,
}

/// Places an ordered stream of candidate bricks under gravity and collision.
///
/// # Algorithm
///
/// For each candidate, in order:
///
/// 1. **Validate**: non-positive sides, a footprint running past the `i32`
///    grid, or a negative layer reject the candidate; the stream continues.
/// 2. **Split**: while both sides exceed `max_unsplit`, cut a
///    `max_unsplit`-wide slice off the larger side (width on ties).
/// 3. **Gravity**: lower the piece while `y > 0` and no footprint cell has an
///    occupied cell directly beneath it. One contact point is enough.
/// 4. **Collision**: raise the piece while any footprint cell is occupied.
/// 5. **Commit**: occupy the footprint and emit a brick.
///
/// Order matters: each placement sees every earlier commit.
#[derive(Debug, Clone, Copy)]
pub struct PlaceBricks {
    max_unsplit: u32,
}

impl PlaceBricks {
    /// Creates a new `PlaceBricks` operation.
    #[must_use]
    pub fn new(params: &BuildParams) -> Self {
        Self {
            max_unsplit: params.max_unsplit.max(1),
        }
    }

    /// Executes placement over typed candidates.
    #[must_use]
    pub fn execute(&self, requests: &[BrickRequest]) -> PlacementReport {
        self.run(requests.iter().map(|r| Ok(r.clone())))
    }

    /// Executes placement over loosely typed records. Records that do not
    /// convert to a candidate are rejected individually.
    #[must_use]
    pub fn execute_records(&self, records: &[BrickRecord]) -> PlacementReport {
        self.run(records.iter().map(BrickRecord::to_request))
    }

    fn run<I>(&self, requests: I) -> PlacementReport
    where
        I: Iterator<Item = Result<BrickRequest, PlacementError>>,
    {
        let mut report = PlacementReport::default();
        for (index, request) in requests.enumerate() {
            report.requested += 1;
            let placed = request.and_then(|r| self.place(&r, &mut report.occupancy, &mut report.bricks));
            if let Err(error) = placed {
                trace!(index, %error, "rejected candidate");
                report.rejections.push(Rejection { index, error });
            }
        }
        debug!(
            requested = report.requested,
            bricks = report.bricks.len(),
            rejected = report.rejections.len(),
            occupied = report.occupancy.len(),
            "placed bricks"
        );
        report
    }

    fn place(
        &self,
        request: &BrickRequest,
        occupancy: &mut OccupancyIndex,
        bricks: &mut Vec<Brick>,
    ) -> Result<(), PlacementError> {
        let (width, depth) = match (u32::try_from(request.width), u32::try_from(request.depth)) {
            (Ok(w), Ok(d))
                if w > 0
                    && d > 0
                    && request.x.checked_add(request.width - 1).is_some()
                    && request.z.checked_add(request.depth - 1).is_some() =>
            {
                (w, d)
            }
            _ => {
                return Err(PlacementError::InvalidFootprint {
                    width: request.width,
                    depth: request.depth,
                })
            }
        };
        if request.y < 0 {
            return Err(PlacementError::InvalidLayer(request.y));
        }

        let whole = Piece {
            x: request.x,
            z: request.z,
            width,
            depth,
        };
        for piece in self.split(whole) {
            let cells: Vec<(i32, i32)> = footprint_cells(piece.x, piece.z, piece.width, piece.depth).collect();
            let y = resolve_layer(occupancy, &cells, request.y);
            occupancy.occupy(cells.iter().copied(), y);
            bricks.push(Brick {
                width: piece.width,
                depth: piece.depth,
                x: piece.x,
                y,
                z: piece.z,
                color: request.color.clone(),
            });
        }
        Ok(())
    }

    /// Splits a footprint until at most one side exceeds `max_unsplit`.
    /// Pieces are returned origin-first.
    fn split(&self, whole: Piece) -> Vec<Piece> {
        let limit = self.max_unsplit;
        let step = i32::try_from(limit).unwrap_or(i32::MAX);
        let mut pieces = Vec::new();
        let mut stack = vec![whole];
        while let Some(piece) = stack.pop() {
            if piece.width <= limit || piece.depth <= limit {
                pieces.push(piece);
                continue;
            }
            let (slice, rest) = if piece.width >= piece.depth {
                (
                    Piece { width: limit, ..piece },
                    Piece {
                        x: piece.x.saturating_add(step),
                        width: piece.width - limit,
                        ..piece
                    },
                )
            } else {
                (
                    Piece { depth: limit, ..piece },
                    Piece {
                        z: piece.z.saturating_add(step),
                        depth: piece.depth - limit,
                        ..piece
                    },
                )
            };
            stack.push(rest);
            stack.push(slice);
        }
        if pieces.len() > 1 {
            trace!(
                width = whole.width,
                depth = whole.depth,
                pieces = pieces.len(),
                "split footprint"
            );
        }
        pieces
    }
}

/// Applies gravity then collision to find the layer a footprint rests on.
fn resolve_layer(occupancy: &OccupancyIndex, cells: &[(i32, i32)], requested: i32) -> i32 {
    // Nothing above `top + 1` can support a piece, so start the fall there.
    let mut y = match occupancy.top() {
        Some(top) => requested.min(top.saturating_add(1)),
        None => 0,
    };
    while y > 0 && !occupancy.any_occupied(cells.iter().copied(), y - 1) {
        y -= 1;
    }
    while occupancy.any_occupied(cells.iter().copied(), y) {
        y += 1;
    }
    y
}
