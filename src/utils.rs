//! Internal utilities

pub(crate) mod str;
