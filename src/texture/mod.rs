pub(crate) mod cache;
pub(crate) mod synth;
pub(crate) mod tile;
