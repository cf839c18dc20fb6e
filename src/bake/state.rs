use crate::{
    bake::{options::BakeOptions, record::FrameRecord, unify::UnifiedBounds},
    foundation::core::IntegerPoint,
    output::naming::OutputNaming,
    scene::{model::NormalMapMaterial, sampler::SampledFrame},
};

/// Mutable run state, owned by one [`Baker`](crate::Baker) and dropped with it.
#[derive(Debug, Default)]
pub(crate) struct PipelineState {
    pub view_index: usize,
    /// Frames sampled for the current view and the next one to capture.
    pub frames: Vec<SampledFrame>,
    pub frame_cursor: usize,
    /// Earliest clock reading at which the next capture may run; `None` until the first one.
    pub next_capture_at: Option<f64>,
    /// Screen-space pivot of the current view.
    pub view_pivot: IntegerPoint,
    /// Present only when frames are held back for unification or packing.
    pub records: Option<Vec<FrameRecord>>,
    pub unified: Option<UnifiedBounds>,
    pub naming: Option<OutputNaming>,
    /// Normal-map material, alive from `Initialize` until the run ends.
    pub normal_material: Option<NormalMapMaterial>,
    pub cancelled: bool,
}

impl PipelineState {
    pub fn new(options: &BakeOptions, view_count: usize, naming: OutputNaming) -> Self {
        let unified = if options.trimming.enabled {
            UnifiedBounds::new(options.trimming.unify, view_count)
        } else {
            None
        };
        Self {
            records: options.accumulates().then(Vec::new),
            unified,
            naming: Some(naming),
            normal_material: options.normal_map.then(NormalMapMaterial::default),
            ..Self::default()
        }
    }

    /// Drop everything held in memory for the run.
    pub fn release(&mut self) {
        self.frames.clear();
        self.records = None;
        self.unified = None;
        self.normal_material = None;
    }
}
