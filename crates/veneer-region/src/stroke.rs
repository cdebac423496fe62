//! Freehand stroke recording and closing.

use veneer_math::{Point3, Tolerance};

use crate::polygon::segment_intersection;

/// State machine over one freehand stroke.
///
/// A stroke starts when the pointer goes down on the target surface,
/// grows by one surface point per pointer move, and is resolved on
/// pointer up: either promoted to a closed path or discarded. An
/// abandoned stroke (no pointer up) simply stays in the recorder until
/// the next `begin` resets it.
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    path: Vec<Point3>,
    drawing: bool,
}

impl StrokeRecorder {
    /// Create an idle recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a stroke at the first hit point. Discards any previous
    /// in-progress stroke.
    pub fn begin(&mut self, point: Point3) {
        self.path.clear();
        self.path.push(point);
        self.drawing = true;
    }

    /// Append a point to the stroke. No-op while idle.
    pub fn extend(&mut self, point: Point3) {
        if self.drawing {
            self.path.push(point);
        }
    }

    /// Whether a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// The in-progress point sequence (for rendering the live line).
    pub fn current(&self) -> &[Point3] {
        &self.path
    }

    /// Resolve the stroke on pointer up and return to idle.
    ///
    /// Resolution order:
    /// 1. *Explicit closure*: at least 3 points and the endpoints within
    ///    the closure threshold. The last point is replaced by an exact
    ///    copy of the first.
    /// 2. *Self-intersection closure*: the sub-path between the first and
    ///    last pairwise segment crossings (see [`extract_closed_path`]).
    /// 3. Otherwise the stroke is discarded and `None` returned.
    pub fn finish(&mut self, tolerance: &Tolerance) -> Option<Vec<Point3>> {
        if !self.drawing {
            return None;
        }
        self.drawing = false;
        let path = std::mem::take(&mut self.path);

        if path.len() <= 1 {
            return None;
        }

        if path.len() >= 3 && tolerance.closes(&path[0], &path[path.len() - 1]) {
            let mut closed = path;
            let first = closed[0];
            *closed.last_mut().unwrap() = first;
            return Some(closed);
        }

        extract_closed_path(&path)
    }
}

/// Extract a simple closed polygon from a self-intersecting stroke.
///
/// Scans every pair of non-adjacent segments `(i, i+1)` / `(j, j+1)` with
/// `j >= i + 2`, outer loop over `i` ascending, inner over `j` ascending.
/// The first-found crossing becomes the start cut and the last-found the
/// end cut; the result is the point run strictly between the two cuts with
/// the crossing points substituted as its new first and last points.
///
/// Returns `None` when no two segments cross (the stroke never closes).
pub fn extract_closed_path(path: &[Point3]) -> Option<Vec<Point3>> {
    let n = path.len();
    if n < 4 {
        return None;
    }

    struct Cut {
        i: usize,
        j: usize,
        point: Point3,
    }

    let mut cuts: Vec<Cut> = Vec::new();
    for i in 0..n - 1 {
        for j in (i + 2)..(n - 1) {
            if let Some(point) =
                segment_intersection(&path[i], &path[i + 1], &path[j], &path[j + 1])
            {
                cuts.push(Cut { i, j, point });
            }
        }
    }

    let first = cuts.first()?;
    let last = cuts.last().unwrap();

    let mut closed: Vec<Point3> = path[first.i + 1..=last.j + 1].to_vec();
    closed[0] = first.point;
    *closed.last_mut().unwrap() = last.point;
    Some(closed)
}
