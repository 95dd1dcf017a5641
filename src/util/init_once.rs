use std::any::type_name;
use std::sync::atomic::{AtomicU8, Ordering};

use async_trait::async_trait;
use log::debug;
use once_cell::sync::OnceCell;
use tokio::sync::Mutex;

use crate::error::{BoxError, Error};

const UNINITIALIZED: u8 = 0;
const INITIALIZING: u8 = 1;
const READY: u8 = 2;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum State {
    Uninitialized,
    Initializing,
    Ready,
}

impl State {
    fn from_u8(state: u8) -> Self {
        match state {
            UNINITIALIZED => State::Uninitialized,
            INITIALIZING => State::Initializing,
            _ => State::Ready,
        }
    }
}

/// Builds the instance a cell publishes. A failed `create` may be retried.
#[async_trait]
pub trait AsyncCreator<T> {
    async fn create(&self) -> Result<T, BoxError>;
}

pub(crate) struct InitOnce<T, AsyncCreatorType: AsyncCreator<T>> {
    initializing: Mutex<()>,
    state: AtomicU8,
    value: OnceCell<T>,
    creator: AsyncCreatorType,
}

impl<T, AsyncCreatorType: AsyncCreator<T>> InitOnce<T, AsyncCreatorType> {
    pub(crate) fn new(creator: AsyncCreatorType) -> Self {
        InitOnce {
            initializing: Mutex::new(()),
            state: AtomicU8::new(UNINITIALIZED),
            value: OnceCell::new(),
            creator,
        }
    }

    pub(crate) fn state(&self) -> State {
        if self.value.get().is_some() {
            return State::Ready;
        }
        State::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Fast path only. Never waits on the construction lock.
    pub(crate) fn try_get(&self) -> Option<&T> {
        self.value.get()
    }

    pub(crate) async fn get<'s>(&'s self) -> Result<&'s T, Error> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let _guard = self.initializing.lock().await;
        // Another caller may have published while we waited on the lock.
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        self.state.store(INITIALIZING, Ordering::Release);
        debug!("constructing shared {}", type_name::<T>());
        let mut revert = Revert {
            state: &self.state,
            published: false,
        };

        let value = self.create().await?;
        let value = self
            .value
            .try_insert(value)
            .map_err(|_| Error::DuplicateConstruction)?;

        revert.published = true;
        self.state.store(READY, Ordering::Release);
        debug!("published shared {}", type_name::<T>());
        Ok(value)
    }

    /// Runs the creator outside of `get`. Refused once construction has started.
    pub(crate) async fn construct(&self) -> Result<T, Error> {
        if self.state() != State::Uninitialized {
            return Err(Error::DuplicateConstruction);
        }
        self.create().await
    }

    async fn create(&self) -> Result<T, Error> {
        self.creator.create().await.map_err(Error::Construction)
    }
}

/// Reverts to uninitialized unless construction was published.
struct Revert<'a> {
    state: &'a AtomicU8,
    published: bool,
}

impl Drop for Revert<'_> {
    fn drop(&mut self) {
        if !self.published {
            self.state.store(UNINITIALIZED, Ordering::Release);
            debug!("construction did not complete, back to uninitialized");
        }
    }
}
