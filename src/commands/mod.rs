//! Command handlers for the `gog` binary

pub(crate) mod complete;
pub(crate) mod completion;
pub(crate) mod google;
