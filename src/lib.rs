//! Reads a compiled JVM class file and emits a Python-style type stub for
//! the class's public surface: its name, its bases, and one `def` line per
//! public method.
//!
//! The crate decodes the class file with its own reader (`parser`), parses
//! field and method descriptors into a structured type representation
//! (`sig`), and renders the stub text (`stub`). I/O stays at the edges: the
//! reader consumes an already-materialized byte buffer, and the renderer
//! writes to any `io::Write` sink.
//!
//! ```no_run
//! let bytes = std::fs::read("Widget.class").unwrap();
//! let text = jstub::stub::generate(&bytes).unwrap();
//! print!("{}", text);
//! ```

pub mod error;
pub mod logging;
pub mod model;
pub mod parser;
pub mod sig;
pub mod stub;

pub use error::{Error, Result};
