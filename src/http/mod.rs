//! HTTP protocol layer module
//!
//! Protocol-level building blocks shared by the responders: MIME detection,
//! Range parsing, conditional-request dates, response builders, and the
//! streaming body type.

pub mod body;
pub mod conditional;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use body::ResponseBody;
pub use range::{ByteRange, RangeResolution};
pub use response::{
    build_304_response, build_403_response, build_404_response, build_405_response,
    build_416_response, build_file_response, build_partial_response,
};
