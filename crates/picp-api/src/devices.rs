// Device endpoints
//
// Network interfaces known to the appliance's NetworkManager.

use crate::client::ApiClient;
use crate::models::NetDevice;
use crate::operation::paths;
use crate::pending::PendingRequest;

impl ApiClient {
    /// List network interfaces.
    ///
    /// `GET /api/devices`
    pub fn get_devices(&self) -> PendingRequest<Vec<NetDevice>> {
        self.get(paths::DEVICES)
    }
}
