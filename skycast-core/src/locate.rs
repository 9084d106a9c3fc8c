use async_trait::async_trait;
use std::fmt::Debug;

use crate::{WidgetError, model::Coordinates};

/// Source of the device position.
#[async_trait]
pub trait Locator: Send + Sync + Debug {
    /// `Err(GeolocationDenied)` when no position is available.
    async fn current_position(&self) -> Result<Coordinates, WidgetError>;
}

/// Reports a fixed position, or denies when none was given.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLocator {
    position: Option<Coordinates>,
}

impl StaticLocator {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }

    pub fn denied() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Locator for StaticLocator {
    async fn current_position(&self) -> Result<Coordinates, WidgetError> {
        self.position.ok_or(WidgetError::GeolocationDenied)
    }
}
