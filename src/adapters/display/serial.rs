use std::time::Duration;

use serialport::SerialPort;

use super::protocol::{DisplayError, DisplayProtocol};

/// Write timeout for the display link
const WRITE_TIMEOUT: Duration = Duration::from_secs(2);

/// Open the serial port and wrap it as a display `width` characters wide.
///
/// The port stays open for the life of the returned value.
pub fn open_serial_display(
    path: &str,
    baud: u32,
    width: usize,
) -> Result<DisplayProtocol<Box<dyn SerialPort>>, DisplayError> {
    let port = serialport::new(path, baud)
        .timeout(WRITE_TIMEOUT)
        .open()
        .map_err(std::io::Error::from)?;

    tracing::info!("Opened display on {} at {} baud", path, baud);
    Ok(DisplayProtocol::new(port, width))
}
