//! Opaque handle state shared with C callers.

use crate::simulation::{Frame, Simulation};

/// What a C caller holds behind a `lenia_*` handle: the running simulation
/// plus the most recently built frame, kept alive until the caller has copied
/// it out.
pub struct State {
    pub sim: Simulation,
    pub frame: Option<Frame>,
}

impl State {
    pub fn new(sim: Simulation) -> Self {
        State { sim, frame: None }
    }

    /// Vertex count of the cached frame, 0 if none was built.
    pub fn frame_vertex_count(&self) -> usize {
        self.frame.as_ref().map_or(0, |f| f.mesh.vertex_count())
    }

    /// Triangle count of the cached frame, 0 if none was built.
    pub fn frame_triangle_count(&self) -> usize {
        self.frame.as_ref().map_or(0, |f| f.triangles.len())
    }
}
