#[cfg(feature = "base32")]
mod base32;
mod error;
#[cfg(feature = "futures")]
mod futures;
mod generator;
mod id;
mod label;
#[cfg(feature = "serde")]
mod serde;
mod time;

#[cfg(feature = "base32")]
pub use crate::base32::*;
pub use crate::error::*;
#[cfg(feature = "futures")]
pub use crate::futures::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::label::*;
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
