//! Typed host-domain contracts shared by the widget desktop runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the synchronous
//! key-value store used by every persisted state slice, time helpers, the notification sink, and
//! the external data-source contracts for weather and currency rates. Concrete browser adapters
//! live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod data_sources;
pub mod host;
pub mod notifications;
pub mod storage;
pub mod time;

pub use data_sources::{
    CurrencyRates, DataSourceFuture, FixedRatesSource, FixedWeatherSource, RatesSource,
    UnavailableDataSource, WeatherSnapshot, WeatherSource, CURRENCY_BASE_CODE,
};
pub use host::{HostServices, HostStrategy};
pub use notifications::{MemoryNotificationService, NoopNotificationService, NotificationService};
pub use storage::key_value::{
    load_typed_with, save_typed_with, KeyValueStore, MemoryKeyValueStore, NoopKeyValueStore,
};
pub use time::{local_utc_offset_minutes, next_monotonic_timestamp_ms, unix_time_ms_now};
