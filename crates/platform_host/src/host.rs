//! Host-bundle model injected into the desktop runtime.

use std::rc::Rc;

use crate::{
    FixedRatesSource, FixedWeatherSource, KeyValueStore, MemoryKeyValueStore,
    NoopNotificationService, NotificationService, RatesSource, UnavailableDataSource,
    WeatherSource,
};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed runtime composition.
    Browser,
    /// In-process adapters only (tests, native previews).
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Runtime-selected host service bundle injected into the desktop runtime and widget modules.
///
/// All environment-specific service selection happens before this bundle crosses into
/// `desktop_runtime`, which keeps the runtime and widget crates decoupled from browser adapter
/// details.
#[derive(Clone)]
pub struct HostServices {
    /// Durable key-value store shared by every persisted slice.
    pub store: Rc<dyn KeyValueStore>,
    /// Notification and audio-cue sink.
    pub notifications: Rc<dyn NotificationService>,
    /// Weather snapshot source.
    pub weather: Rc<dyn WeatherSource>,
    /// Currency rate source.
    pub rates: Rc<dyn RatesSource>,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Builds a headless bundle: in-memory store, silent notifications, unavailable data sources.
    pub fn headless() -> Self {
        Self {
            store: Rc::new(MemoryKeyValueStore::default()),
            notifications: Rc::new(NoopNotificationService),
            weather: Rc::new(UnavailableDataSource),
            rates: Rc::new(UnavailableDataSource),
            host_strategy: HostStrategy::Headless,
        }
    }

    /// Replaces the store, keeping the other services.
    pub fn with_store(mut self, store: Rc<dyn KeyValueStore>) -> Self {
        self.store = store;
        self
    }

    /// Replaces the notification sink, keeping the other services.
    pub fn with_notifications(mut self, notifications: Rc<dyn NotificationService>) -> Self {
        self.notifications = notifications;
        self
    }

    /// Replaces the weather source with a fixed snapshot.
    pub fn with_fixed_weather(mut self, source: FixedWeatherSource) -> Self {
        self.weather = Rc::new(source);
        self
    }

    /// Replaces the rates source with a fixed table.
    pub fn with_fixed_rates(mut self, source: FixedRatesSource) -> Self {
        self.rates = Rc::new(source);
        self
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("host_strategy", &self.host_strategy)
            .finish_non_exhaustive()
    }
}
