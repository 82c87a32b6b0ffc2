// Hardware configuration endpoints
//
// Fan, OLED display, and access-point-mode Wi-Fi settings. Each is a plain
// get/set pair over the same route.

use crate::client::ApiClient;
use crate::models::{DisplayConfig, FanConfig, WifiConfig};
use crate::operation::paths;
use crate::pending::PendingRequest;

impl ApiClient {
    /// `GET /api/fan`
    pub fn get_fan_config(&self) -> PendingRequest<FanConfig> {
        self.get(paths::FAN)
    }

    /// `POST /api/fan`
    pub fn set_fan_config(&self, config: &FanConfig) -> PendingRequest<()> {
        self.post(paths::FAN, config)
    }

    /// `GET /api/display`
    pub fn get_display_config(&self) -> PendingRequest<DisplayConfig> {
        self.get(paths::DISPLAY)
    }

    /// `POST /api/display`
    pub fn set_display_config(&self, config: &DisplayConfig) -> PendingRequest<()> {
        self.post(paths::DISPLAY, config)
    }

    /// `GET /api/wifi/config`
    pub fn get_wifi_config(&self) -> PendingRequest<WifiConfig> {
        self.get(paths::WIFI_CONFIG)
    }

    /// `POST /api/wifi/config`
    pub fn set_wifi_config(&self, config: &WifiConfig) -> PendingRequest<()> {
        self.post(paths::WIFI_CONFIG, config)
    }
}
