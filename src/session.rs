use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::codec::{bytes_to_int, decode_scaled, encode_scaled_voltage, int_to_bytes};
use crate::common::characteristics;
use crate::tables::{CHARGING_MODES, CHARGING_STATUSES};
use crate::{Error, EventSink, LogSink, Result, SessionEvent, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// One pass over every telemetry characteristic.
#[derive(Debug, Clone, PartialEq)]
pub struct Telemetry {
    /// Panel voltage, V
    pub solar_voltage: f64,
    /// Panel current, A
    pub solar_current: f64,
    /// `solar_voltage * solar_current`, W
    pub solar_power: f64,
    /// Battery voltage, V
    pub battery_voltage: f64,
    /// Energy generated today, kWh
    pub power_generation_today: f64,
    /// Controller temperature, °C
    pub controller_temperature: f64,
    pub charging_status: &'static str,
}

/// Connection to a single charge controller.
///
/// Every operation takes `&mut self`, so a session has exactly one user at a
/// time. Wrap it in a [`SharedSession`] to use it from several tasks.
pub struct DeviceSession<T: Transport> {
    address: String,
    transport: Arc<T>,
    handle: Option<T::Handle>,
    events: Arc<dyn EventSink>,
}

impl<T: Transport> DeviceSession<T> {
    /// Create a disconnected session for the device at `address`.
    pub fn new(address: impl Into<String>, transport: T) -> Self {
        Self::with_shared_transport(address, Arc::new(transport))
    }

    /// Like [`new`](Self::new), for several sessions over one adapter.
    pub fn with_shared_transport(address: impl Into<String>, transport: Arc<T>) -> Self {
        Self {
            address: address.into(),
            transport,
            handle: None,
            events: Arc::new(LogSink),
        }
    }

    /// Replace the default [`LogSink`].
    pub fn with_event_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.events = Arc::new(sink);
        self
    }

    #[inline]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[inline]
    pub fn state(&self) -> ConnectionState {
        if self.handle.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    /// Ask the transport whether the link behind this session is still alive.
    pub async fn is_link_up(&self) -> bool {
        match &self.handle {
            Some(handle) => self.transport.is_connected(handle).await,
            None => false,
        }
    }

    /// Open the link to the device.
    ///
    /// A session that still holds a live link returns immediately. A stale
    /// link is closed first and then reopened.
    pub async fn connect(&mut self) -> Result<()> {
        if let Some(handle) = &self.handle {
            if self.transport.is_connected(handle).await {
                log::debug!("Already connected to {}", self.address);
                return Ok(());
            }
        }

        if let Some(stale) = self.handle.take() {
            log::debug!("Replacing stale link to {}", self.address);
            if let Err(e) = self.transport.close(&stale).await {
                log::warn!("Could not close stale link to {}: {:?}", self.address, e);
            }
        }

        let handle = self.transport.open(&self.address).await?;
        self.handle = Some(handle);
        self.events.emit(&SessionEvent::Connected {
            address: self.address.clone(),
        });

        Ok(())
    }

    /// Close the link. The session is disconnected afterwards even when the
    /// transport reports a failure. Calling this on a disconnected session
    /// does nothing.
    pub async fn disconnect(&mut self) -> Result<()> {
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => {
                log::trace!("{} is already disconnected", self.address);
                return Ok(());
            }
        };

        let closed = self.transport.close(&handle).await;
        self.events.emit(&SessionEvent::Disconnected {
            address: self.address.clone(),
        });

        closed.map_err(Error::from)
    }

    /// Connect, run `f` and disconnect again, whatever `f` returns.
    ///
    /// A session that was already connected stays connected afterwards;
    /// only a link opened here is closed here. An error from `f` wins over
    /// an error from the disconnect.
    pub async fn with_connection<R, F>(&mut self, f: F) -> Result<R>
    where
        F: for<'s> FnOnce(&'s mut Self) -> BoxFuture<'s, Result<R>>,
    {
        let opened_here = self.handle.is_none();

        self.connect().await?;
        let outcome = f(&mut *self).await;
        let closed = if opened_here {
            self.disconnect().await
        } else {
            Ok(())
        };

        match (outcome, closed) {
            (Err(e), _) => Err(e),
            (Ok(_), Err(e)) => Err(e),
            (Ok(value), Ok(())) => Ok(value),
        }
    }

    fn handle(&self) -> Result<&T::Handle> {
        self.handle.as_ref().ok_or_else(|| Error::NotConnected {
            address: self.address.clone(),
        })
    }

    pub async fn read_characteristic(&mut self, characteristic: Uuid) -> Result<Vec<u8>> {
        let handle = self.handle()?;
        let value = self.transport.read(handle, characteristic).await?;
        log::trace!("{} read {}: {:02x?}", self.address, characteristic, value);
        Ok(value)
    }

    pub async fn write_characteristic(&mut self, characteristic: Uuid, data: &[u8]) -> Result<()> {
        let handle = self.handle()?;
        log::trace!("{} write {}: {:02x?}", self.address, characteristic, data);
        self.transport.write(handle, characteristic, data).await?;
        Ok(())
    }

    async fn read_scaled(&mut self, characteristic: Uuid) -> Result<f64> {
        let raw = self.read_characteristic(characteristic).await?;
        decode_scaled(&raw)
    }

    pub async fn solar_voltage(&mut self) -> Result<f64> {
        self.read_scaled(characteristics::SOLAR_VOLTAGE).await
    }

    pub async fn solar_current(&mut self) -> Result<f64> {
        self.read_scaled(characteristics::SOLAR_CURRENT).await
    }

    /// Voltage times current, from two sequential reads. The two values
    /// may come from different device samples.
    pub async fn solar_power(&mut self) -> Result<f64> {
        let volts = self.solar_voltage().await?;
        let amps = self.solar_current().await?;
        Ok(volts * amps)
    }

    pub async fn battery_voltage(&mut self) -> Result<f64> {
        self.read_scaled(characteristics::BATTERY_VOLTAGE).await
    }

    pub async fn power_generation_today(&mut self) -> Result<f64> {
        self.read_scaled(characteristics::POWER_GENERATION_TODAY).await
    }

    pub async fn controller_temperature(&mut self) -> Result<f64> {
        self.read_scaled(characteristics::CONTROLLER_TEMPERATURE).await
    }

    pub async fn charging_status(&mut self) -> Result<&'static str> {
        let raw = self
            .read_characteristic(characteristics::CHARGING_STATUS)
            .await?;
        Ok(CHARGING_STATUSES.label(bytes_to_int(&raw)?))
    }

    /// Read every telemetry value in turn. Stops at the first failing read.
    pub async fn read_telemetry(&mut self) -> Result<Telemetry> {
        let solar_voltage = self.solar_voltage().await?;
        let solar_current = self.solar_current().await?;
        let battery_voltage = self.battery_voltage().await?;
        let power_generation_today = self.power_generation_today().await?;
        let controller_temperature = self.controller_temperature().await?;
        let charging_status = self.charging_status().await?;

        Ok(Telemetry {
            solar_voltage,
            solar_current,
            solar_power: solar_voltage * solar_current,
            battery_voltage,
            power_generation_today,
            controller_temperature,
            charging_status,
        })
    }

    /// Write a charging mode by label. Unrecognised labels send code 0
    /// (deactivated).
    pub async fn set_charging_mode(&mut self, label: &str) -> Result<()> {
        let code = CHARGING_MODES.code(label);
        let data = int_to_bytes::<2>(u64::from(code))?;

        self.write_characteristic(characteristics::SET_CHARGING_MODE, &data)
            .await?;

        self.events.emit(&SessionEvent::ChargingModeSet {
            address: self.address.clone(),
            label: label.to_string(),
            code,
        });

        Ok(())
    }

    /// Write a target voltage. Hundredths of a volt below the wire
    /// resolution are truncated.
    pub async fn set_voltage(&mut self, volts: f64) -> Result<()> {
        let data = encode_scaled_voltage(volts)?;

        self.write_characteristic(characteristics::SET_VOLTAGE, &data)
            .await?;

        self.events.emit(&SessionEvent::VoltageSet {
            address: self.address.clone(),
            volts,
            raw: u16::from_be_bytes(data),
        });

        Ok(())
    }
}

impl<T: Transport> Drop for DeviceSession<T> {
    fn drop(&mut self) {
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => return,
        };

        log::warn!("Session for {} dropped while connected", self.address);

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let transport = self.transport.clone();
                let address = self.address.clone();
                runtime.spawn(async move {
                    if let Err(e) = transport.close(&handle).await {
                        log::warn!("Could not close link to {}: {:?}", address, e);
                    }
                });

                self.events.emit(&SessionEvent::Disconnected {
                    address: self.address.clone(),
                });
            }
            Err(_) => log::warn!(
                "No runtime to close link to {}, link left open",
                self.address
            ),
        }
    }
}

/// A [`DeviceSession`] that several tasks can use in turn.
pub struct SharedSession<T: Transport> {
    inner: Arc<Mutex<DeviceSession<T>>>,
}

impl<T: Transport> Clone for SharedSession<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Transport> From<DeviceSession<T>> for SharedSession<T> {
    fn from(session: DeviceSession<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }
}

impl<T: Transport> SharedSession<T> {
    /// Wait for exclusive use of the session.
    pub async fn lock(&self) -> MutexGuard<'_, DeviceSession<T>> {
        self.inner.lock().await
    }
}
