use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A characteristic operation was attempted without an open session.
    #[error("device {address} is not connected")]
    NotConnected { address: String },

    /// The BLE transport failed. Passed through as-is.
    #[error("transport error: {0}")]
    Transport(#[from] btleplug::Error),

    /// A value does not fit the fixed-width wire format.
    #[error("cannot encode {value} into {width} byte(s)")]
    EncodingRange { value: String, width: usize },

    /// A device value is wider than 64 bits.
    #[error("cannot decode a {width} byte value into 64 bits")]
    DecodingRange { width: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
