//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer for the key-value store,
//! notifications and audio cues, and the weather/currency fetch adapters. Every adapter compiles
//! on native targets too, where it degrades to an inert or failing implementation so the runtime
//! crates stay testable off the browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and the host-services factory used by the entry layer.
pub mod adapters;
pub mod data_sources;
pub mod notifications;
pub mod storage;

pub use adapters::{build_host_services, host_strategy_name, selected_host_strategy};
pub use data_sources::{
    parse_open_meteo_response, parse_rates_response, FetchRatesSource, FetchWeatherSource,
    DEFAULT_WEATHER_LATITUDE, DEFAULT_WEATHER_LONGITUDE,
};
pub use notifications::WebNotificationService;
pub use storage::local_store::WebKeyValueStore;
