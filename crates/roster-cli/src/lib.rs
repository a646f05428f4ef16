//! Library parts of the `drais-import` command line tool.

pub mod bindings;
pub mod logging;
pub mod pipeline;
