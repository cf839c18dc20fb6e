pub(crate) mod camera;
pub(crate) mod model;
pub(crate) mod sampler;
pub(crate) mod sequence;
pub(crate) mod shadow;
pub(crate) mod view;
