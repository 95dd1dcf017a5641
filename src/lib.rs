//! Lazily created, process-wide single instances.

mod singleton;

mod config;
mod error;
mod registry;
mod util;

pub use config::{Config, DuplicationPolicy};
pub use error::{BoxError, Error, Result};
pub use registry::InstanceRegistry;
pub use singleton::{Singleton, SingletonCreator};
pub use util::init_once::{AsyncCreator, State};

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}
