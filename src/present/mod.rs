pub(crate) mod content;
pub(crate) mod controller;
pub(crate) mod scene;
pub(crate) mod tilt;
