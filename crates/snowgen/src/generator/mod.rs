mod builder;
mod lock;
mod status;

pub use builder::*;
pub use lock::*;
pub use status::*;
