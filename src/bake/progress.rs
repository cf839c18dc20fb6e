use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Progress reported when a view begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewProgress<'a> {
    pub view_index: usize,
    pub view_count: usize,
    pub view_name: &'a str,
}

impl ViewProgress<'_> {
    /// Fraction of views started, counting this one.
    pub fn fraction(&self) -> f32 {
        if self.view_count == 0 {
            return 1.0;
        }
        (self.view_index + 1) as f32 / self.view_count as f32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressSignal {
    Continue,
    /// Abort the whole run, not just this view.
    Cancel,
}

/// Receives progress and may request cancellation. Polled once per view.
pub trait ProgressSink {
    fn view_started(&mut self, progress: ViewProgress<'_>) -> ProgressSignal;
}

/// Shared cancellation flag, settable from another thread (e.g. a Ctrl-C handler).
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Logs progress through `tracing` and honors an optional [`CancelToken`].
#[derive(Clone, Debug, Default)]
pub struct TracingProgress {
    cancel: Option<CancelToken>,
}

impl TracingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

impl ProgressSink for TracingProgress {
    fn view_started(&mut self, p: ViewProgress<'_>) -> ProgressSignal {
        tracing::info!(
            view = p.view_name,
            index = p.view_index + 1,
            total = p.view_count,
            percent = (p.fraction() * 100.0) as u32,
            "view started"
        );
        match &self.cancel {
            Some(token) if token.is_cancelled() => ProgressSignal::Cancel,
            _ => ProgressSignal::Continue,
        }
    }
}
