// Console login endpoints
//
// `login` makes the appliance set its session cookie in the HTTP engine's
// jar; every later request on the same client carries it.

use crate::client::ApiClient;
use crate::models::{LoginCredentials, LoginSetting, LoginSettingUpdate};
use crate::operation::paths;
use crate::pending::PendingRequest;

impl ApiClient {
    /// Log in to the console.
    ///
    /// `POST /api/login`. Wrong credentials come back as
    /// [`Error::Application`](crate::Error::Application) with the appliance's message.
    pub fn login(&self, credentials: &LoginCredentials) -> PendingRequest<()> {
        self.post(paths::LOGIN, credentials)
    }

    /// `GET /api/login_setting`
    pub fn get_login_setting(&self) -> PendingRequest<LoginSetting> {
        self.get(paths::LOGIN_SETTING)
    }

    /// Change (or, with an empty user, disable) console login.
    ///
    /// `POST /api/login_setting`. The appliance drops every other session.
    pub fn set_login_setting(&self, settings: &LoginSettingUpdate) -> PendingRequest<()> {
        self.post(paths::LOGIN_SETTING, settings)
    }
}
