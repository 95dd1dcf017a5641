use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{BoxError, Error, Result};
use crate::util::init_once::{AsyncCreator, State};

/// Binds a `'static` registry to a type, inside its `impl` block.
#[macro_export]
macro_rules! singleton {
    ($t:ty, $creator:ty = $make:expr, $config:expr) => {
        pub fn registry() -> &'static $crate::InstanceRegistry<$t, $creator> {
            static REGISTRY: $crate::__private::Lazy<$crate::InstanceRegistry<$t, $creator>> =
                $crate::__private::Lazy::new(|| $crate::InstanceRegistry::with_config($make, $config));
            &REGISTRY
        }

        pub async fn shared() -> $crate::Result<&'static $t> {
            Self::registry().acquire().await
        }
    };
    ($t:ty, $creator:ty = $make:expr) => {
        $crate::singleton!($t, $creator = $make, $crate::Config::default());
    };
    ($t:ty, $creator:ty, $config:expr) => {
        $crate::singleton!($t, $creator = <$creator>::default(), $config);
    };
    ($t:ty, $creator:ty) => {
        $crate::singleton!($t, $creator = <$creator>::default(), $crate::Config::default());
    };
}

/// The one-per-process instance. Read persisted copies back with `from_persisted`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Singleton {
    #[serde(skip, default = "Instant::now")]
    created_at: Instant,
}

/// Only constructible inside this crate, by `Singleton`'s registry.
#[derive(Debug)]
pub struct SingletonCreator {
    _sealed: (),
}

#[async_trait]
impl AsyncCreator<Singleton> for SingletonCreator {
    async fn create(&self) -> std::result::Result<Singleton, BoxError> {
        if Singleton::registry().state() != State::Initializing {
            return Err(Error::DuplicateConstruction.into());
        }
        Ok(Singleton {
            created_at: Instant::now(),
        })
    }
}

impl Singleton {
    singleton!(Singleton, SingletonCreator = SingletonCreator { _sealed: () });

    pub async fn instance() -> Result<&'static Singleton> {
        Self::shared().await
    }

    pub async fn from_persisted<'de, D>(deserializer: D) -> Result<&'static Singleton>
    where
        D: Deserializer<'de>,
        D::Error: Send + Sync + 'static,
    {
        Self::registry().load(deserializer).await
    }

    pub async fn duplicate(&self) -> Result<&'static Singleton> {
        Self::registry().duplicate().await
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }
}
