//! Timeline data model: clips, tracks and audio lanes.

pub(crate) mod clip;
pub mod lanes;
pub(crate) mod media;
pub(crate) mod model;
