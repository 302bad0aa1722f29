//! Serial port line source.

#[cfg(feature = "instrument_serial")]
mod enabled {
    use crate::device::{LineSource, ReadEvent};
    use crate::error::{AppResult, DaqError};
    use log::{debug, info};
    use serialport::SerialPort;
    use std::io::Read;
    use std::time::Duration;

    /// A [`LineSource`] over a serial port.
    ///
    /// Bytes are accumulated until a newline; a read timeout with a line
    /// still in flight keeps the partial bytes buffered for the next
    /// attempt. Invalid UTF-8 is replaced, not fatal. The port closes
    /// when the source is dropped.
    pub struct SerialLineSource {
        port_name: String,
        port: Box<dyn SerialPort>,
        buf: Vec<u8>,
    }

    impl SerialLineSource {
        /// Open a port and wait out the board's auto-reset.
        ///
        /// Open failure is fatal; the logging loop never starts without a
        /// device.
        pub fn open(
            port_name: &str,
            baud: u32,
            read_timeout: Duration,
            settle: Duration,
        ) -> AppResult<Self> {
            let port = serialport::new(port_name, baud)
                .timeout(read_timeout)
                .open()
                .map_err(|e| {
                    DaqError::Device(format!(
                        "failed to open serial port '{port_name}' at {baud} baud: {e}"
                    ))
                })?;
            info!("Serial port '{port_name}' opened at {baud} baud");
            if !settle.is_zero() {
                debug!("Waiting {settle:?} for the board to settle");
                std::thread::sleep(settle);
            }
            Ok(Self {
                port_name: port_name.to_string(),
                port,
                buf: Vec::new(),
            })
        }
    }

    impl LineSource for SerialLineSource {
        fn read_line(&mut self) -> AppResult<ReadEvent> {
            let mut byte = [0u8; 1];
            loop {
                match self.port.read(&mut byte) {
                    Ok(0) => return Ok(ReadEvent::Closed),
                    Ok(_) => {
                        if byte[0] == b'\n' {
                            let line = String::from_utf8_lossy(&self.buf).trim().to_string();
                            self.buf.clear();
                            debug!("[{}] received line: {line}", self.port_name);
                            return Ok(ReadEvent::Line(line));
                        }
                        self.buf.push(byte[0]);
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
                        return Ok(ReadEvent::TimedOut);
                    }
                    Err(e) => return Err(DaqError::Io(e)),
                }
            }
        }
    }

    impl Drop for SerialLineSource {
        fn drop(&mut self) {
            debug!("Serial port '{}' closed", self.port_name);
        }
    }
}

#[cfg(not(feature = "instrument_serial"))]
mod disabled {
    use crate::device::{LineSource, ReadEvent};
    use crate::error::{AppResult, DaqError};
    use std::time::Duration;

    /// Stub used when serial support is compiled out.
    pub struct SerialLineSource;

    impl SerialLineSource {
        /// Always fails; rebuild with `--features instrument_serial`.
        pub fn open(
            _port_name: &str,
            _baud: u32,
            _read_timeout: Duration,
            _settle: Duration,
        ) -> AppResult<Self> {
            Err(DaqError::SerialFeatureDisabled)
        }
    }

    impl LineSource for SerialLineSource {
        fn read_line(&mut self) -> AppResult<ReadEvent> {
            Err(DaqError::SerialFeatureDisabled)
        }
    }
}

#[cfg(feature = "instrument_serial")]
pub use enabled::SerialLineSource;

#[cfg(not(feature = "instrument_serial"))]
pub use disabled::SerialLineSource;
