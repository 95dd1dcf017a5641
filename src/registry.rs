use std::any::type_name;

use log::debug;
use serde::{Deserialize, Deserializer};

use crate::config::{Config, DuplicationPolicy};
use crate::error::{Error, Result};
use crate::util::init_once::{AsyncCreator, InitOnce, State};

/// Owner of the single instance of `T`, created by `C` on first use.
pub struct InstanceRegistry<T, C: AsyncCreator<T>> {
    cell: InitOnce<T, C>,
    config: Config,
}

impl<T, C: AsyncCreator<T>> InstanceRegistry<T, C> {
    pub fn new(creator: C) -> Self {
        Self::with_config(creator, Config::default())
    }

    pub fn with_config(creator: C, config: Config) -> Self {
        InstanceRegistry {
            cell: InitOnce::new(creator),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> State {
        self.cell.state()
    }

    /// Returns the instance if already published, without waiting.
    pub fn get(&self) -> Option<&T> {
        self.cell.try_get()
    }

    /// Returns the shared instance, creating it on the first call.
    pub async fn acquire(&self) -> Result<&T> {
        self.cell.get().await
    }

    pub(crate) async fn construct(&self) -> Result<T> {
        self.cell.construct().await
    }

    /// Substitutes the shared instance for a freshly deserialized `loaded`.
    pub async fn resolve_on_load(&self, loaded: T) -> Result<&T> {
        drop(loaded);
        debug!("discarding a loaded {} in favour of the shared one", type_name::<T>());
        self.acquire().await
    }

    /// Reads a `T` from `deserializer` and resolves it to the shared instance.
    pub async fn load<'de, D>(&self, deserializer: D) -> Result<&T>
    where
        D: Deserializer<'de>,
        D::Error: Send + Sync + 'static,
        T: Deserialize<'de>,
    {
        let loaded = T::deserialize(deserializer).map_err(|e| Error::Load(Box::new(e)))?;
        self.resolve_on_load(loaded).await
    }

    /// Answers a request to copy the shared instance.
    pub async fn duplicate(&self) -> Result<&T> {
        match self.config.duplication {
            DuplicationPolicy::Canonical => self.acquire().await,
            DuplicationPolicy::Reject => Err(Error::DuplicationNotSupported),
        }
    }
}
