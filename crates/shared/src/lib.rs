//! Value types shared by the tier engine, the snapshot codec and the front end.

pub mod domain;
pub mod error;
pub mod protocol;
