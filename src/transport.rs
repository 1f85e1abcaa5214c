use async_trait::async_trait;
use btleplug::Result;
use uuid::Uuid;

/// The BLE operations a [`DeviceSession`](crate::DeviceSession) is built on.
///
/// Implementations own no session state; the handle returned by `open`
/// identifies the link for every later call.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    type Handle: Send + Sync + 'static;

    async fn open(&self, address: &str) -> Result<Self::Handle>;

    /// Best-effort close of a link previously returned by `open`.
    async fn close(&self, handle: &Self::Handle) -> Result<()>;

    async fn read(&self, handle: &Self::Handle, characteristic: Uuid) -> Result<Vec<u8>>;

    async fn write(&self, handle: &Self::Handle, characteristic: Uuid, data: &[u8]) -> Result<()>;

    async fn is_connected(&self, handle: &Self::Handle) -> bool;
}
