pub(crate) mod path;
pub(crate) mod svg;
pub(crate) mod text;
