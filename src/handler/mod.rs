//! Request handling module
//!
//! The protocol and security core: safe path resolution, the single-file
//! responder, the directory responder composing the two, and the dispatch
//! entry point used by the server loop.

pub mod directory;
pub mod file;
pub mod resolve;
pub mod router;

pub use directory::{DirectoryResponder, ResponderFactory, ResponderFuture};
pub use router::{handle_request, RequestContext};
