//! This example switches a charge controller to another charging mode.
//! Usage: set_charging_mode <address> <mode>, e.g. "Boost" or "Floating".

use rover_ble::tables::CHARGING_MODES;
use rover_ble::{BtleplugTransport, DeviceSession, Error, TransportConfig};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let address = std::env::args().nth(1).expect("Expected device address");
    let mode = std::env::args().nth(2).expect("Expected charging mode");
    pretty_env_logger::init();

    if !CHARGING_MODES.labels().any(|label| label == mode) {
        println!("Unknown mode {:?}, the device will be deactivated", mode);
    }

    let transport = BtleplugTransport::new(TransportConfig::default()).await?;
    let mut session = DeviceSession::new(address, transport);

    session.connect().await?;
    session.set_charging_mode(&mode).await?;
    println!("Charging status: {}", session.charging_status().await?);
    session.disconnect().await?;

    Ok(())
}
