//! Display Adapter
//!
//! Serial character-matrix display: wire protocol and port setup.

mod protocol;
mod serial;

pub use protocol::{
    compose_line, DisplayError, DisplayProtocol, INIT_SEQUENCE, LINE_COUNT,
    WRITE_LINE_PREFIX,
};
pub use serial::open_serial_display;
