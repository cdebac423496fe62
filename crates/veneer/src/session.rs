//! Interactive painting session state.

use veneer_decal::{
    DecalPlacement, MaskedRegion, PixelBuffer, RegionParams, Rgba,
};
use veneer_math::{Point3, Tolerance, Vec3};
use veneer_region::{point_in_polygon, StrokeRecorder};
use veneer_surface::{
    align_to_anchor, circular_mean_u, generic_uv, surface_normal, CylinderMap, TriMesh,
};

use crate::texture::TextureSlot;

/// Index of a saved closed path within a session.
pub type PathId = usize;

/// Index of a free decal within a session.
pub type DecalId = usize;

/// Index of a texture slot within a session.
pub type TextureId = usize;

/// One ray/surface intersection reported by the renderer.
#[derive(Debug, Clone)]
pub struct SurfaceHit {
    /// Hit point in world space.
    pub world_point: Point3,
    /// Surface normal at the hit, in world space, when the renderer
    /// provides one.
    pub normal: Option<Vec3>,
    /// Distance from the ray origin.
    pub distance: f64,
}

/// The renderer/raycaster seam: given a normalized screen coordinate,
/// report the ray's surface intersections ordered by distance.
///
/// The session only ever consumes the nearest hit.
pub trait Picker {
    /// Cast a ray through NDC `(ndc_x, ndc_y)` and return its hits.
    fn pick(&self, ndc_x: f64, ndc_y: f64) -> Vec<SurfaceHit>;
}

/// A promoted freehand path.
#[derive(Debug, Clone)]
pub struct SavedPath {
    /// The closed point sequence in mesh-local space (first == last, or
    /// joined through a self-intersection cut).
    pub points: Vec<Point3>,
    /// Set once a texture drop lands inside this path: the synthesized
    /// region supersedes the outline's rendering.
    pub outline_hidden: bool,
}

/// A free decal: a single oriented sticker on the surface.
#[derive(Debug, Clone)]
pub struct FreeDecal {
    /// Position/orientation/scale on the target.
    pub placement: DecalPlacement,
    /// Texture slot rendered into the sticker.
    pub texture: TextureId,
}

/// A (path, texture) masked-region pairing.
#[derive(Debug, Clone)]
pub struct MaskedAssociation {
    /// The saved path the region conforms to.
    pub path: PathId,
    /// The synthesized mask/tiling data.
    pub region: MaskedRegion,
    /// Texture slot tiled into the region.
    pub texture: TextureId,
}

/// How a texture drop was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The drop landed inside a saved path; a masked region was
    /// synthesized (replacing any earlier association on that path).
    MaskedRegion(PathId),
    /// The drop landed on open surface; a free decal was placed.
    FreeDecal(DecalId),
    /// The drop hit nothing usable and was ignored.
    Ignored,
}

/// All mutable painting state for one target surface.
///
/// Owned explicitly and driven synchronously by pointer events; nothing
/// here is shared or ambient. Every failure mode degrades to "nothing is
/// drawn" — the session never panics on bad input.
#[derive(Debug)]
pub struct PaintSession {
    target: TriMesh,
    map: CylinderMap,
    recorder: StrokeRecorder,
    saved_paths: Vec<SavedPath>,
    free_decals: Vec<FreeDecal>,
    masked: Vec<MaskedAssociation>,
    slots: Vec<TextureSlot>,
    params: RegionParams,
    tolerance: Tolerance,
}

impl PaintSession {
    /// Create a session for a target mesh and its parametric mapping.
    pub fn new(target: TriMesh, map: CylinderMap) -> Self {
        Self {
            target,
            map,
            recorder: StrokeRecorder::new(),
            saved_paths: Vec::new(),
            free_decals: Vec::new(),
            masked: Vec::new(),
            slots: Vec::new(),
            params: RegionParams::default(),
            tolerance: Tolerance::DEFAULT,
        }
    }

    /// Override the region-synthesis parameters.
    pub fn with_params(mut self, params: RegionParams) -> Self {
        self.params = params;
        self
    }

    /// Register a new texture slot and return its id.
    pub fn add_texture_slot(&mut self) -> TextureId {
        self.slots.push(TextureSlot::new());
        self.slots.len() - 1
    }

    /// Mutable access to a texture slot (to begin/complete loads).
    pub fn slot_mut(&mut self, id: TextureId) -> Option<&mut TextureSlot> {
        self.slots.get_mut(id)
    }

    // =========================================================================
    // Freehand drawing
    // =========================================================================

    /// Pointer down: start a stroke if the ray hits the target.
    pub fn pointer_down(&mut self, picker: &dyn Picker, ndc_x: f64, ndc_y: f64) {
        if let Some(hit) = nearest_hit(picker.pick(ndc_x, ndc_y)) {
            let local = self.target.world_to_local(&hit.world_point);
            self.recorder.begin(local);
        }
    }

    /// Pointer move: extend the stroke when drawing and the ray hits.
    pub fn pointer_move(&mut self, picker: &dyn Picker, ndc_x: f64, ndc_y: f64) {
        if !self.recorder.is_drawing() {
            return;
        }
        if let Some(hit) = nearest_hit(picker.pick(ndc_x, ndc_y)) {
            let local = self.target.world_to_local(&hit.world_point);
            self.recorder.extend(local);
        }
    }

    /// Pointer up: resolve the stroke. Returns the id of the promoted
    /// path, or `None` when the stroke was discarded.
    pub fn pointer_up(&mut self) -> Option<PathId> {
        let points = self.recorder.finish(&self.tolerance)?;
        self.warn_if_wider_than_half_domain(&points);
        self.saved_paths.push(SavedPath {
            points,
            outline_hidden: false,
        });
        Some(self.saved_paths.len() - 1)
    }

    /// The in-progress stroke, for live line rendering.
    pub fn current_stroke(&self) -> &[Point3] {
        self.recorder.current()
    }

    // =========================================================================
    // Texture drops
    // =========================================================================

    /// Resolve a texture drop at a screen position.
    ///
    /// The nearest ray hit is mapped to a parametric coordinate via the
    /// generic nearest-face lookup; each saved path is then wrap-aligned
    /// to the drop's own u and tested for containment. The first
    /// containing path receives a masked region (replacing any earlier
    /// association on it, and hiding the path outline); otherwise a free
    /// decal is placed, oriented by the hit normal.
    pub fn drop_texture(
        &mut self,
        picker: &dyn Picker,
        ndc_x: f64,
        ndc_y: f64,
        texture: TextureId,
    ) -> DropOutcome {
        let Some(hit) = nearest_hit(picker.pick(ndc_x, ndc_y)) else {
            log::debug!("drop ignored: no surface hit");
            return DropOutcome::Ignored;
        };

        let drop_uv = match generic_uv(&self.target, &hit.world_point) {
            Ok(uv) => uv,
            Err(err) => {
                log::warn!("drop ignored: UV mapping unavailable ({err})");
                return DropOutcome::Ignored;
            }
        };
        log::debug!("drop UV ({:.4}, {:.4})", drop_uv.x, drop_uv.y);

        for (id, saved) in self.saved_paths.iter().enumerate() {
            if saved.points.len() < 3 {
                continue;
            }
            let path_uvs: Vec<_> = saved.points.iter().map(|p| self.map.uv(p)).collect();
            let aligned = align_to_anchor(&path_uvs, drop_uv.x);
            if point_in_polygon(&drop_uv, &aligned) {
                return self.attach_masked_region(id, texture);
            }
        }

        self.place_free_decal(&hit, texture)
    }

    fn attach_masked_region(&mut self, path_id: PathId, texture: TextureId) -> DropOutcome {
        let region =
            match MaskedRegion::synthesize(&self.saved_paths[path_id].points, &self.map, &self.params)
            {
                Ok(region) => region,
                Err(err) => {
                    log::warn!("drop ignored: region synthesis failed ({err})");
                    return DropOutcome::Ignored;
                }
            };

        // At most one active association per path: a later drop replaces
        // the earlier region rather than stacking on top of it.
        self.masked.retain(|assoc| assoc.path != path_id);
        self.masked.push(MaskedAssociation {
            path: path_id,
            region,
            texture,
        });
        self.saved_paths[path_id].outline_hidden = true;
        log::debug!("masked region attached to path {path_id}");
        DropOutcome::MaskedRegion(path_id)
    }

    fn place_free_decal(&mut self, hit: &SurfaceHit, texture: TextureId) -> DropOutcome {
        let normal = hit
            .normal
            .or_else(|| surface_normal(&self.target, &hit.world_point).ok())
            .unwrap_or_else(Vec3::y);
        let local = self.target.world_to_local(&hit.world_point);
        self.free_decals.push(FreeDecal {
            placement: DecalPlacement::oriented(local, &normal),
            texture,
        });
        log::debug!("free decal placed");
        DropOutcome::FreeDecal(self.free_decals.len() - 1)
    }

    // =========================================================================
    // Rendering accessors
    // =========================================================================

    /// Saved closed paths (outlines render unless hidden by a region).
    pub fn saved_paths(&self) -> &[SavedPath] {
        &self.saved_paths
    }

    /// Free decals placed so far.
    pub fn free_decals(&self) -> &[FreeDecal] {
        &self.free_decals
    }

    /// Active masked-region associations.
    pub fn masked_regions(&self) -> &[MaskedAssociation] {
        &self.masked
    }

    /// Run the per-pixel contract of association `index` at a mesh-local
    /// surface point, sampling the bound texture.
    ///
    /// `None` when the pixel is discarded *or* when the slot has no
    /// decoded texture yet (the region stays unrendered until a load
    /// succeeds).
    pub fn shade_masked(&self, index: usize, surface_point: &Point3) -> Option<Rgba> {
        let assoc = self.masked.get(index)?;
        let base: &PixelBuffer = self.slots.get(assoc.texture)?.texture()?;
        assoc.region.shade(surface_point, base)
    }

    fn warn_if_wider_than_half_domain(&self, points: &[Point3]) {
        let uvs: Vec<_> = points.iter().map(|p| self.map.uv(p)).collect();
        let aligned = align_to_anchor(&uvs, circular_mean_u(&uvs));
        let (mut min_u, mut max_u) = (f64::INFINITY, f64::NEG_INFINITY);
        for uv in &aligned {
            min_u = min_u.min(uv.x);
            max_u = max_u.max(uv.x);
        }
        if max_u - min_u > 0.5 {
            // Known wrap-alignment limitation, surfaced rather than "fixed"
            log::warn!(
                "saved path spans {:.2} of the wrap domain (> 0.5); \
                 containment tests near the seam may misalign",
                max_u - min_u
            );
        }
    }
}

fn nearest_hit(hits: Vec<SurfaceHit>) -> Option<SurfaceHit> {
    hits.into_iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
