use serde::Deserialize;

use reqwest::Method;

use crate::client::Client;
use crate::error::Result;
use crate::response::Envelope;

/// A physical device registered to the vendor account.
///
/// Fields the vendor omits for a device model decode to their default
/// values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    /// Device identifier.
    pub device_id: String,
    /// Device name.
    pub device_name: String,
    /// Device model type.
    pub device_type: String,
    /// Whether the device is bound to the vendor cloud service.
    pub enable_cloud_service: bool,
    /// Identifier of the hub the device is paired with.
    pub hub_device_id: String,
}

/// An infrared appliance controlled through a hub.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfraredRemote {
    /// Remote identifier.
    pub device_id: String,
    /// Remote name.
    pub device_name: String,
    /// Remote model type.
    pub remote_type: String,
    /// Identifier of the hub the remote is paired with.
    pub hub_device_id: String,
}

/// The payload returned by the device listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Devices {
    /// Physical devices bound to the account.
    pub device_list: Vec<Device>,
    /// Infrared remotes bound to the account.
    pub infrared_remote_list: Vec<InfraredRemote>,
}

/// The payload returned by the device status endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceStatus {
    /// Device identifier.
    pub device_id: String,
    /// Device model type.
    pub device_type: String,
    /// Power state of the device.
    pub power: String,
    /// Identifier of the hub the device is paired with.
    ///
    /// Unlike every other field of the API, this one is snake case on
    /// the wire.
    #[serde(rename = "hub_device_id")]
    pub hub_device_id: String,
    /// Temperature reading in Celsius, for devices with a meter.
    pub temperature: f64,
    /// Relative humidity percentage, for devices with a meter.
    pub humidity: i64,
}

impl Client {
    /// Retrieves all devices registered to the account.
    ///
    /// API reference:
    /// <https://github.com/OpenWonderLabs/SwitchBotAPI/blob/main/README.md#devices>
    ///
    /// # Errors
    ///
    /// Network failures or timeouts may prevent the request from being
    /// sent. An error is also returned when the server replies with an
    /// `HTTP` status other than `200 OK` or with a body that is not a
    /// valid device listing envelope.
    pub async fn devices(&self) -> Result<Envelope<Devices>> {
        let response = self.execute(Method::GET, "/devices").await?;
        response.parse_body().await
    }

    /// Retrieves the status of the device with the given identifier.
    ///
    /// API reference:
    /// <https://github.com/OpenWonderLabs/SwitchBotAPI/blob/main/README.md#get-device-status>
    ///
    /// # Errors
    ///
    /// Network failures or timeouts may prevent the request from being
    /// sent. An error is also returned when the server replies with an
    /// `HTTP` status other than `200 OK` or with a body that is not a
    /// valid device status envelope.
    pub async fn device_status(&self, device_id: &str) -> Result<Envelope<DeviceStatus>> {
        let response = self
            .execute(Method::GET, &format!("/devices/{device_id}/status"))
            .await?;
        response.parse_body().await
    }
}
