use async_trait::async_trait;
use btleplug::api::{Central, Characteristic, Manager as _, Peripheral as _, WriteType};
use btleplug::platform::{Adapter, Manager, Peripheral};
use btleplug::{Error, Result};
use uuid::Uuid;

use crate::Transport;

pub struct TransportConfig {
    /// Index of the Bluetooth adapter to use. The first found adapter is used by default.
    adapter_index: usize,
    /// Whether command writes wait for the device to acknowledge them.
    write_type: WriteType,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            adapter_index: 0,
            write_type: WriteType::WithResponse,
        }
    }
}

impl TransportConfig {
    /// Index of bluetooth adapter to use
    pub fn adapter_index(mut self, index: usize) -> Self {
        self.adapter_index = index;
        self
    }

    /// Wait for an acknowledgement on every write
    pub fn write_with_response(mut self) -> Self {
        self.write_type = WriteType::WithResponse;
        self
    }

    /// Fire-and-forget writes
    pub fn write_without_response(mut self) -> Self {
        self.write_type = WriteType::WithoutResponse;
        self
    }
}

/// [`Transport`] backed by the platform Bluetooth stack.
///
/// The device must already be known to the adapter (paired, or seen by a
/// scan run elsewhere); this transport never scans.
pub struct BtleplugTransport {
    _manager: Manager,
    adapter: Adapter,
    write_type: WriteType,
}

impl BtleplugTransport {
    pub async fn new(config: TransportConfig) -> Result<Self> {
        let manager = Manager::new().await?;
        let mut adapters = manager.adapters().await?;

        if config.adapter_index >= adapters.len() {
            return Err(Error::DeviceNotFound);
        }

        let adapter = adapters.swap_remove(config.adapter_index);

        log::trace!("Using adapter: {:?}", adapter);

        Ok(Self {
            _manager: manager,
            adapter,
            write_type: config.write_type,
        })
    }

    async fn find_peripheral(&self, address: &str) -> Result<Peripheral> {
        self.adapter
            .peripherals()
            .await?
            .into_iter()
            .find(|p| p.address().to_string().eq_ignore_ascii_case(address))
            .ok_or(Error::DeviceNotFound)
    }

    async fn characteristic(&self, peripheral: &Peripheral, uuid: Uuid) -> Result<Characteristic> {
        let mut characteristics = peripheral.characteristics();
        if characteristics.is_empty() {
            peripheral.discover_services().await?;
            characteristics = peripheral.characteristics();
        }

        characteristics
            .into_iter()
            .find(|characteristic| characteristic.uuid == uuid)
            .ok_or_else(|| Error::NotSupported(format!("characteristic {}", uuid)))
    }
}

#[async_trait]
impl Transport for BtleplugTransport {
    type Handle = Peripheral;

    async fn open(&self, address: &str) -> Result<Peripheral> {
        let peripheral = self.find_peripheral(address).await?;

        if !peripheral.is_connected().await? {
            log::debug!("Connecting to device {}", peripheral.address());
            peripheral.connect().await?;
        }
        peripheral.discover_services().await?;

        Ok(peripheral)
    }

    async fn close(&self, peripheral: &Peripheral) -> Result<()> {
        peripheral.disconnect().await
    }

    async fn read(&self, peripheral: &Peripheral, uuid: Uuid) -> Result<Vec<u8>> {
        let characteristic = self.characteristic(peripheral, uuid).await?;
        peripheral.read(&characteristic).await
    }

    async fn write(&self, peripheral: &Peripheral, uuid: Uuid, data: &[u8]) -> Result<()> {
        let characteristic = self.characteristic(peripheral, uuid).await?;
        peripheral.write(&characteristic, data, self.write_type).await
    }

    async fn is_connected(&self, peripheral: &Peripheral) -> bool {
        peripheral.is_connected().await.unwrap_or(false)
    }
}
