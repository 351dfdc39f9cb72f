pub(crate) mod dimensions;
pub(crate) mod engine;
