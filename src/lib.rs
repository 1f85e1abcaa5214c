//! BLE client for solar charge controllers.
//!
//! A [`DeviceSession`] owns the link to one controller. It reads telemetry
//! (panel voltage and current, battery voltage, energy generated today,
//! controller temperature, charging status) and writes the two control
//! values the device accepts: charging mode and target voltage.
//!
//! The BLE stack sits behind the [`Transport`] trait. [`BtleplugTransport`]
//! talks to the platform adapter; tests supply their own.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rover_ble::{BtleplugTransport, DeviceSession, Error, TransportConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     pretty_env_logger::init();
//!
//!     let transport = BtleplugTransport::new(TransportConfig::default()).await?;
//!     let mut session = DeviceSession::new("AA:BB:CC:DD:EE:FF", transport);
//!
//!     session.connect().await?;
//!     println!("Solar voltage: {} V", session.solar_voltage().await?);
//!     session.set_charging_mode("Boost").await?;
//!     session.disconnect().await?;
//!
//!     Ok(())
//! }
//!```

#![warn(clippy::all, future_incompatible, nonstandard_style, rust_2018_idioms)]

pub use btleplug::Error as BleError;

pub use error::{Error, Result};
pub use events::{BroadcastSink, EventSink, LogSink, SessionEvent};
pub use peripheral::{BtleplugTransport, TransportConfig};
pub use session::{ConnectionState, DeviceSession, SharedSession, Telemetry};
pub use transport::Transport;

mod error;
mod events;
mod peripheral;
mod session;
mod transport;

pub mod codec;
pub mod common;
pub mod tables;
