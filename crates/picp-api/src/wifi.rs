// Wi-Fi access point endpoints
//
// Scanning, connecting, toggling, and forgetting client-mode Wi-Fi
// connections on one of the appliance's wireless interfaces.

use tracing::debug;

use crate::client::ApiClient;
use crate::models::{WifiAp, WifiApSetting};
use crate::operation::{Operation, paths};
use crate::pending::PendingRequest;

impl ApiClient {
    /// List access points visible from `device`.
    ///
    /// `GET /api/wifi?device={device}`
    pub fn list_wifi_ap(&self, device: &str) -> PendingRequest<Vec<WifiAp>> {
        self.dispatch(Operation::get(paths::WIFI).with_query("device", device))
    }

    /// Connect to a new AP, or bring a saved connection up or down.
    ///
    /// `POST /api/wifi`. Settings that fail [`WifiApSetting::validate`] are
    /// rejected without contacting the appliance.
    pub fn create_wifi_ap(&self, setting: &WifiApSetting) -> PendingRequest<()> {
        if let Err(e) = setting.validate() {
            debug!(error = %e, "rejecting wifi setting locally");
            return PendingRequest::rejected(e);
        }
        self.post(paths::WIFI, setting)
    }

    /// Forget a saved connection.
    ///
    /// `DELETE /api/wifi?connection_uuid={connection_uuid}`
    pub fn delete_wifi_ap(&self, connection_uuid: &str) -> PendingRequest<()> {
        self.dispatch(
            Operation::delete(paths::WIFI).with_query("connection_uuid", connection_uuid),
        )
    }
}
