//! Interactive edits: move, resize and lane reassignment.

pub(crate) mod apply;
pub(crate) mod command;
pub(crate) mod session;
