mod crockford;
mod error;
mod snowgen;

use crockford::*;
pub use error::*;
pub use snowgen::*;
