pub(crate) mod bounds;
pub(crate) mod geometry;
pub(crate) mod point;
