//! This example reads one telemetry snapshot from a charge controller.
//! The device address should be given as a command line argument.

use rover_ble::{BtleplugTransport, DeviceSession, Error, TransportConfig};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let address = std::env::args().nth(1).expect("Expected device address");
    pretty_env_logger::init();

    let transport = BtleplugTransport::new(TransportConfig::default()).await?;
    let mut session = DeviceSession::new(address, transport);

    let telemetry = session
        .with_connection(|s| Box::pin(async move { s.read_telemetry().await }))
        .await?;

    println!("{:#?}", telemetry);

    Ok(())
}
