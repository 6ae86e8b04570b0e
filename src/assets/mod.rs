pub(crate) mod color;
pub(crate) mod geometry;
pub(crate) mod library;
pub(crate) mod records;
