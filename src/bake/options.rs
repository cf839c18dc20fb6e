use crate::{
    foundation::error::{BakeError, BakeResult},
    output::{naming::OutputOptions, prefab::PrefabTemplate},
    scene::{shadow::ShadowOptions, view::ViewRotation},
};

/// Which frames share one unified crop rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnifyScope {
    /// Every frame keeps its own tight rectangle.
    #[default]
    Off,
    /// One rectangle per view.
    PerView,
    /// One rectangle across all views.
    AllViews,
}

/// Largest accepted trimming margin, in pixels.
pub const MAX_MARGIN: u32 = 4096;

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrimmingOptions {
    pub enabled: bool,
    /// Pixels kept around the content bound.
    pub margin: u32,
    /// Only meaningful while trimming is enabled.
    pub unify: UnifyScope,
}

impl TrimmingOptions {
    pub fn is_unified(&self) -> bool {
        self.enabled && self.unify != UnifyScope::Off
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PackingOptions {
    pub enabled: bool,
    pub padding: u32,
    pub max_size: u32,
}

impl Default for PackingOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            padding: 2,
            max_size: 4096,
        }
    }
}

/// Everything that shapes a bake run.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BakeOptions {
    pub trimming: TrimmingOptions,
    pub packing: PackingOptions,
    pub output: OutputOptions,
    pub shadow: ShadowOptions,
    /// Capture a normal map alongside every color frame.
    pub normal_map: bool,
    /// Minimum wall-clock delay between two captures, in seconds.
    pub frame_delay_secs: f64,
    pub rotation: ViewRotation,
    /// Camera pitch applied to every view, in degrees.
    pub slope_deg: f32,
    pub prefab: Option<PrefabTemplate>,
}

impl BakeOptions {
    pub fn validate(&self) -> BakeResult<()> {
        if !(self.frame_delay_secs.is_finite() && self.frame_delay_secs >= 0.0) {
            return Err(BakeError::config("frame_delay_secs must be finite and >= 0"));
        }
        if !self.slope_deg.is_finite() || self.slope_deg.abs() > 90.0 {
            return Err(BakeError::config("slope_deg must be within [-90, 90]"));
        }
        if self.trimming.margin > MAX_MARGIN {
            return Err(BakeError::config(format!(
                "trimming margin {} exceeds {MAX_MARGIN}",
                self.trimming.margin
            )));
        }
        if self.packing.enabled && self.packing.max_size == 0 {
            return Err(BakeError::config("packing max_size must be > 0"));
        }
        if self.output.material_shader.trim().is_empty() {
            return Err(BakeError::config("output material_shader must be non-empty"));
        }
        self.shadow.validate()?;
        if let Some(prefab) = &self.prefab {
            prefab.validate()?;
        }
        Ok(())
    }

    /// Whether captured frames are held back until the end of the run instead of being
    /// finalized one by one.
    pub fn accumulates(&self) -> bool {
        self.packing.enabled || self.trimming.is_unified()
    }
}
