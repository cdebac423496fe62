#![warn(missing_docs)]

//! Region containment and freehand stroke closing for veneer.
//!
//! - [`point_in_polygon`] - even-odd containment test in parameter space
//! - [`segment_intersection`] - 2D segment crossing with the z carried through
//! - [`StrokeRecorder`] - state machine turning a freehand point stream into
//!   a closed path, either by endpoint proximity or by self-intersection
//!
//! Containment tests assume the polygon and the query point were produced
//! by the same parametric mapping and jointly wrap-aligned to a common
//! anchor (see `veneer-surface`); this crate never infers an anchor.

mod polygon;
mod stroke;

pub use polygon::{point_in_polygon, segment_intersection};
pub use stroke::{extract_closed_path, StrokeRecorder};
