//! Path encoding and decoding

mod path;

pub use path::{DecodedPath, PathCodec};
