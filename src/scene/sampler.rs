use crate::foundation::error::{BakeError, BakeResult};

/// One animation time picked for capture.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SampledFrame {
    pub index: u32,
    pub time: f32,
}

/// How a model kind turns a frame count into animation times.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameSampler {
    /// Skeletal/mesh clip. Looping clips skip the last frame since it equals the first.
    Clip {
        length_secs: f32,
        frame_count: u32,
        #[serde(default)]
        looping: bool,
    },
    /// Particle system simulated from `start_delay_secs` through its duration.
    Particle {
        duration_secs: f32,
        #[serde(default)]
        start_delay_secs: f32,
        frame_count: u32,
    },
}

impl FrameSampler {
    pub fn frame_count(&self) -> u32 {
        match *self {
            Self::Clip { frame_count, .. } | Self::Particle { frame_count, .. } => frame_count,
        }
    }

    pub fn validate(&self) -> BakeResult<()> {
        let (len, extra) = match *self {
            Self::Clip { length_secs, .. } => (length_secs, 0.0),
            Self::Particle {
                duration_secs,
                start_delay_secs,
                ..
            } => (duration_secs, start_delay_secs),
        };
        if !(len.is_finite() && len >= 0.0 && extra.is_finite() && extra >= 0.0) {
            return Err(BakeError::config(
                "sampler length and delay must be finite and >= 0",
            ));
        }
        if self.frame_count() == 0 {
            return Err(BakeError::config("sampler frame_count must be >= 1"));
        }
        Ok(())
    }

    pub fn ratio(&self, i: u32) -> f32 {
        let n = self.frame_count();
        let denom = match *self {
            Self::Clip { looping: true, .. } => n,
            _ => n.saturating_sub(1),
        };
        if denom == 0 {
            return 0.0;
        }
        i as f32 / denom as f32
    }

    pub fn time_for_ratio(&self, ratio: f32) -> f32 {
        match *self {
            Self::Clip { length_secs, .. } => ratio * length_secs,
            Self::Particle {
                duration_secs,
                start_delay_secs,
                ..
            } => start_delay_secs + ratio * duration_secs,
        }
    }

    pub fn sample(&self) -> Vec<SampledFrame> {
        (0..self.frame_count())
            .map(|index| SampledFrame {
                index,
                time: self.time_for_ratio(self.ratio(index)),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/sampler.rs"]
mod tests;
