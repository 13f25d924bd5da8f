mod layout;
mod snowgen;

use layout::*;
pub use snowgen::*;
