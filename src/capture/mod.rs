pub(crate) mod adapter;
pub(crate) mod extractor;
pub(crate) mod sequence;
