//! Frame-driven animation math: range mapping, easing, springs and the semantic helpers built
//! on them.

pub(crate) mod ease;
pub(crate) mod interpolate;
pub(crate) mod primitives;
pub(crate) mod spring;
