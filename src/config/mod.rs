pub(crate) mod descriptor;
pub(crate) mod dimension;
pub(crate) mod field;
pub(crate) mod model;
pub(crate) mod normalize;
