//! # tupono-grid-json
//!
//! JSON reader and writer for the serialized sheet format:
//!
//! ```json
//! {"rows":8,"cols":6,"cells":[{"r":0,"c":0,"rowSpan":1,"colSpan":2,"content":"",
//!   "bold":false,"italic":false,"align":"left","vAlign":"top"}]}
//! ```

mod error;
mod options;
mod reader;
mod writer;

pub use error::{JsonError, JsonResult};
pub use options::{SheetReadOptions, SheetWriteOptions};
pub use reader::SheetReader;
pub use writer::SheetWriter;
