use std::rc::Rc;

use platform_host::{HostServices, HostStrategy};

use crate::{FetchRatesSource, FetchWeatherSource, WebKeyValueStore, WebNotificationService};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "headless-host")]
    {
        HostStrategy::Headless
    }

    #[cfg(not(feature = "headless-host"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Builds the host service bundle for the selected strategy.
///
/// The browser bundle persists to `localStorage`, notifies through the Web Notifications API, and
/// fetches weather and currency data over the network. The headless bundle keeps everything in
/// memory and reports both data sources as unavailable.
pub fn build_host_services() -> HostServices {
    match selected_host_strategy() {
        HostStrategy::Browser => {
            let notifications = WebNotificationService;
            notifications.request_permission();
            HostServices {
                store: Rc::new(WebKeyValueStore),
                notifications: Rc::new(notifications),
                weather: Rc::new(FetchWeatherSource::default()),
                rates: Rc::new(FetchRatesSource),
                host_strategy: HostStrategy::Browser,
            }
        }
        HostStrategy::Headless => HostServices::headless(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_name_matches_bundle() {
        let services = build_host_services();
        assert_eq!(services.host_strategy.as_str(), host_strategy_name());
    }
}
