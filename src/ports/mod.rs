//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - The brokerage account service (login, portfolio fetch)
//! - The time-based one-time code generator
//! - Wall-clock time and sleeping

pub mod brokerage;
pub mod clock;
pub mod one_time_code;
pub mod mocks;

pub use brokerage::{BrokerageError, BrokeragePort, Session};
pub use clock::{Clock, SystemClock};
pub use one_time_code::{CodeError, OneTimeCodeSource};
