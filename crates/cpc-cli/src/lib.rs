//! Library surface of the portal CLI; binaries and tests share the
//! logging setup through here.

pub mod logging;
