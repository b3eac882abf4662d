pub(crate) mod color;
pub(crate) mod line;
pub(crate) mod surface;
