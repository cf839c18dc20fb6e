pub(crate) mod baker;
pub(crate) mod clock;
pub(crate) mod options;
pub(crate) mod progress;
pub(crate) mod record;
pub(crate) mod state;
pub(crate) mod unify;
