//! The bake state machine.
//!
//! A run walks `Initialize -> BeginView -> CaptureFrame* -> EndView -> ... -> Finalize` and ends
//! in exactly one [`BakeStatus`]. Each [`Baker::tick`] performs at most one transition and never
//! blocks: when the capture delay has not elapsed yet it reports [`Tick::Waiting`] and does
//! nothing. [`Baker::run`] drives ticks to completion, sleeping on the [`Clock`] in between.

use std::time::Duration;

use crate::{
    bake::{
        clock::Clock,
        options::BakeOptions,
        progress::{ProgressSignal, ProgressSink, ViewProgress},
        record::FrameRecord,
        state::PipelineState,
        unify::unify_records,
    },
    bitmap::geometry::tight_bound_or_pivot,
    capture::{
        adapter::{capture_color, capture_normal},
        extractor::Extractor,
    },
    foundation::error::{BakeError, BakeResult},
    output::{
        dispatch::{BakeOutputs, FinalizeContext, bind_template, finalize_packed, finalize_single},
        material::MaterialBuilder,
        naming::OutputNaming,
        packer::Packer,
        persistence::Persistence,
        prefab::TemplateBuilder,
    },
    scene::{
        camera::Camera,
        model::BakeModel,
        shadow::ShadowPlacer,
        view::{ViewDescriptor, ViewRotation},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BakeState {
    Initialize,
    BeginView,
    CaptureFrame,
    EndView,
    Finalize,
}

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum BakeStatus {
    Finished,
    /// Stopped on request at the start of a view. Not an error.
    Cancelled,
    /// Stopped by an error; the reason is the error's message.
    Failed(String),
}

/// Outcome of one [`Baker::tick`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Moved to this state; tick again.
    Running(BakeState),
    /// Capture throttled; nothing happened. Tick again after (at least) this long.
    Waiting(Duration),
    Done(BakeStatus),
}

enum Transition {
    Goto(BakeState),
    Wait(Duration),
    Cancel,
    Done,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BakeReport {
    pub status: BakeStatus,
    pub frames_captured: usize,
    pub outputs: BakeOutputs,
}

/// External collaborators a run talks to.
pub struct BakeServices<'a> {
    pub extractor: &'a mut dyn Extractor,
    pub shadow: &'a mut dyn ShadowPlacer,
    pub packer: &'a mut dyn Packer,
    pub persistence: &'a mut dyn Persistence,
    pub progress: &'a mut dyn ProgressSink,
    pub materials: &'a dyn MaterialBuilder,
    pub templates: &'a dyn TemplateBuilder,
    pub clock: &'a dyn Clock,
}

pub struct Baker<'a> {
    model: &'a mut dyn BakeModel,
    camera: &'a mut Camera,
    views: &'a [ViewDescriptor],
    options: &'a BakeOptions,
    services: BakeServices<'a>,
    state: Option<BakeState>,
    pipeline: PipelineState,
    status: Option<BakeStatus>,
    frames_captured: usize,
    outputs: BakeOutputs,
}

/// Bake `model` from every view in `views` and drive the run to completion.
pub fn bake<'a>(
    model: &'a mut dyn BakeModel,
    camera: &'a mut Camera,
    views: &'a [ViewDescriptor],
    options: &'a BakeOptions,
    services: BakeServices<'a>,
) -> BakeReport {
    Baker::new(model, camera, views, options, services).run()
}

fn finalize_context<'s>(
    naming: Option<&'s OutputNaming>,
    options: &'s BakeOptions,
    materials: &'s dyn MaterialBuilder,
    persistence: &'s mut dyn Persistence,
) -> BakeResult<FinalizeContext<'s>> {
    let naming = naming.ok_or_else(|| BakeError::config("output naming is not initialized"))?;
    Ok(FinalizeContext {
        naming,
        shader: &options.output.material_shader,
        materials,
        persistence,
    })
}

impl<'a> Baker<'a> {
    pub fn new(
        model: &'a mut dyn BakeModel,
        camera: &'a mut Camera,
        views: &'a [ViewDescriptor],
        options: &'a BakeOptions,
        services: BakeServices<'a>,
    ) -> Self {
        Self {
            model,
            camera,
            views,
            options,
            services,
            state: Some(BakeState::Initialize),
            pipeline: PipelineState::default(),
            status: None,
            frames_captured: 0,
            outputs: BakeOutputs::default(),
        }
    }

    /// Current state, or `None` once finalization has started.
    pub fn state(&self) -> Option<BakeState> {
        self.state
    }

    pub fn status(&self) -> Option<&BakeStatus> {
        self.status.as_ref()
    }

    pub fn frames_captured(&self) -> usize {
        self.frames_captured
    }

    pub fn outputs(&self) -> &BakeOutputs {
        &self.outputs
    }

    /// Frames held for unification or packing, if the run accumulates.
    pub fn pending_frames(&self) -> usize {
        self.pipeline.records.as_ref().map_or(0, Vec::len)
    }

    pub fn is_cancelled(&self) -> bool {
        self.pipeline.cancelled
    }

    /// Perform at most one state transition.
    pub fn tick(&mut self) -> Tick {
        if let Some(status) = &self.status {
            return Tick::Done(status.clone());
        }
        let Some(state) = self.state else {
            return self.finish(BakeStatus::Failed("bake run has no active state".to_string()));
        };

        let step = match state {
            BakeState::Initialize => self.initialize(),
            BakeState::BeginView => self.begin_view(),
            BakeState::CaptureFrame => self.capture_frame(),
            BakeState::EndView => self.end_view(),
            BakeState::Finalize => self.finalize(),
        };

        match step {
            Ok(Transition::Goto(next)) => {
                tracing::trace!(from = ?state, to = ?next, "transition");
                self.state = Some(next);
                Tick::Running(next)
            }
            Ok(Transition::Wait(remaining)) => Tick::Waiting(remaining),
            Ok(Transition::Cancel) => self.finish(BakeStatus::Cancelled),
            Ok(Transition::Done) => self.finish(BakeStatus::Finished),
            Err(err) => {
                tracing::error!(state = ?state, error = %err, "bake run failed");
                self.finish(BakeStatus::Failed(err.to_string()))
            }
        }
    }

    /// Tick until the run ends, sleeping through capture delays.
    #[tracing::instrument(skip_all, fields(model = %self.model.name(), views = self.views.len()))]
    pub fn run(mut self) -> BakeReport {
        let status = loop {
            match self.tick() {
                Tick::Running(_) => {}
                Tick::Waiting(remaining) => self.services.clock.sleep(remaining),
                Tick::Done(status) => break status,
            }
        };
        BakeReport {
            status,
            frames_captured: self.frames_captured,
            outputs: self.outputs,
        }
    }

    fn initialize(&mut self) -> BakeResult<Transition> {
        let options = self.options;
        options.validate()?;
        if self.views.is_empty() {
            return Err(BakeError::config("at least one view is required"));
        }
        self.camera.validate()?;
        let naming = OutputNaming::new(&options.output, self.model.name())?;

        if options.rotation == ViewRotation::Model {
            self.camera.look_at(self.model.pivot_position());
        }
        self.services
            .shadow
            .arrange(&options.shadow, &*self.model, &*self.camera)?;
        self.services.persistence.create_folder(naming.dir())?;

        tracing::info!(
            model = %self.model.name(),
            views = self.views.len(),
            accumulate = options.accumulates(),
            dir = %naming.dir().display(),
            "bake initialized"
        );
        self.pipeline = PipelineState::new(options, self.views.len(), naming);
        Ok(Transition::Goto(BakeState::BeginView))
    }

    fn begin_view(&mut self) -> BakeResult<Transition> {
        let (views, options) = (self.views, self.options);
        let index = self.pipeline.view_index;
        let view = views
            .get(index)
            .ok_or_else(|| BakeError::config(format!("view index {index} out of range")))?;

        let signal = self.services.progress.view_started(ViewProgress {
            view_index: index,
            view_count: views.len(),
            view_name: &view.name,
        });
        if signal == ProgressSignal::Cancel {
            tracing::warn!(view = %view.name, "cancellation requested");
            self.pipeline.cancelled = true;
            return Ok(Transition::Cancel);
        }

        view.apply(
            options.rotation,
            options.slope_deg,
            &mut *self.camera,
            &mut *self.model,
        );
        if view.rebuild_shadow {
            self.services
                .shadow
                .arrange(&options.shadow, &*self.model, &*self.camera)?;
        }

        self.pipeline.view_pivot = self.camera.world_to_screen(self.model.pivot_position());
        self.pipeline.frames = self.model.sampled_frames();
        self.pipeline.frame_cursor = 0;
        tracing::debug!(
            view = %view.name,
            pivot = ?self.pipeline.view_pivot,
            frames = self.pipeline.frames.len(),
            "view started"
        );

        if self.pipeline.frames.is_empty() {
            return Ok(Transition::Goto(BakeState::EndView));
        }
        Ok(Transition::Goto(BakeState::CaptureFrame))
    }

    fn capture_frame(&mut self) -> BakeResult<Transition> {
        let (views, options) = (self.views, self.options);
        let now = self.services.clock.now_secs();
        if let Some(deadline) = self.pipeline.next_capture_at
            && now < deadline
        {
            // Waits are at least 1 ns so sleeping on one always moves the clock.
            let remaining = Duration::from_secs_f64(deadline - now).max(Duration::from_nanos(1));
            return Ok(Transition::Wait(remaining));
        }

        let Some(frame) = self.pipeline.frames.get(self.pipeline.frame_cursor).copied() else {
            return Ok(Transition::Goto(BakeState::EndView));
        };
        let view_index = self.pipeline.view_index;
        let view = views
            .get(view_index)
            .ok_or_else(|| BakeError::config(format!("view index {view_index} out of range")))?;

        self.model.advance_time(frame.time);
        let color = capture_color(
            &mut *self.services.extractor,
            &mut *self.services.shadow,
            &*self.camera,
            &mut *self.model,
            &options.shadow,
        )?;
        let normal = match self.pipeline.normal_material.as_mut() {
            Some(material) => {
                let (rot_x, rot_y) = view.normal_map_rotation(options.rotation, options.slope_deg);
                Some(capture_normal(
                    &mut *self.services.extractor,
                    &mut *self.services.shadow,
                    &*self.camera,
                    &mut *self.model,
                    material,
                    rot_x,
                    rot_y,
                )?)
            }
            None => None,
        };
        self.pipeline.next_capture_at = Some(now + options.frame_delay_secs);
        self.frames_captured += 1;

        let pivot = self.pipeline.view_pivot;
        let name = format!("{}_{:04}", view.name, frame.index);
        let mut record = FrameRecord::new(name, view_index, pivot, color, normal);
        if options.trimming.enabled {
            let bound = tight_bound_or_pivot(&record.color, pivot);
            match self.pipeline.unified.as_mut() {
                Some(unified) => unified.include(view_index, bound),
                None => record.trim(bound, options.trimming.margin)?,
            }
        }
        tracing::debug!(
            frame = %record.name,
            time = frame.time,
            width = record.color.width(),
            height = record.color.height(),
            "frame captured"
        );

        match self.pipeline.records.as_mut() {
            Some(records) => records.push(record),
            None => {
                let mut ctx = finalize_context(
                    self.pipeline.naming.as_ref(),
                    options,
                    self.services.materials,
                    &mut *self.services.persistence,
                )?;
                finalize_single(&record, &mut ctx, &mut self.outputs)?;
            }
        }

        self.pipeline.frame_cursor += 1;
        if self.pipeline.frame_cursor < self.pipeline.frames.len() {
            Ok(Transition::Goto(BakeState::CaptureFrame))
        } else {
            Ok(Transition::Goto(BakeState::EndView))
        }
    }

    fn end_view(&mut self) -> BakeResult<Transition> {
        self.pipeline.view_index += 1;
        if self.pipeline.view_index < self.views.len() {
            Ok(Transition::Goto(BakeState::BeginView))
        } else {
            Ok(Transition::Goto(BakeState::Finalize))
        }
    }

    fn finalize(&mut self) -> BakeResult<Transition> {
        self.state = None;
        let options = self.options;

        let mut ctx = finalize_context(
            self.pipeline.naming.as_ref(),
            options,
            self.services.materials,
            &mut *self.services.persistence,
        )?;

        if let Some(mut records) = self.pipeline.records.take() {
            if let Some(unified) = &self.pipeline.unified {
                unify_records(&mut records, unified, options.trimming.margin)?;
            }
            if options.packing.enabled {
                finalize_packed(
                    records,
                    &mut *self.services.packer,
                    &mut ctx,
                    &mut self.outputs,
                )?;
            } else {
                for record in &records {
                    finalize_single(record, &mut ctx, &mut self.outputs)?;
                }
            }
        }

        if let Some(template) = &options.prefab {
            bind_template(template, self.services.templates, &mut ctx, &mut self.outputs)?;
        }
        Ok(Transition::Done)
    }

    /// End the run with `status`. Runs on every exit path, including failures in `Finalize`.
    fn finish(&mut self, status: BakeStatus) -> Tick {
        self.state = None;
        self.pipeline.release();
        self.model.clear_frames();

        match &status {
            BakeStatus::Finished => tracing::info!(
                frames = self.frames_captured,
                textures = self.outputs.textures.len(),
                "bake finished"
            ),
            BakeStatus::Cancelled => tracing::warn!(
                frames = self.frames_captured,
                view = self.pipeline.view_index,
                "bake cancelled"
            ),
            BakeStatus::Failed(_) => {}
        }
        self.status = Some(status.clone());
        Tick::Done(status)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bake/baker.rs"]
mod tests;
