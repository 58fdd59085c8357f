//! Transport-agnostic link engine for the Syndesis serial protocol
//!
//! This crate contains everything between the wire format and the host loop:
//!
//! - Serial transport trait (implemented by UART drivers, PTYs, sockets)
//! - Handler registry and dispatch (get / set / byte-stream handlers)
//! - Acknowledgment protocol (`OK`/`INVALID` replies, blocking ack waits)
//! - The [`Link`] orchestrator with its per-tick `handle()` entry point
//!
//! Processing is single-threaded and poll-driven: nothing happens until the
//! host loop calls [`Link::handle`], and the link owns its serial port
//! exclusively for its lifetime.

#![no_std]
#![deny(unsafe_code)]

pub mod dispatch;
pub mod link;
pub mod traits;

pub use dispatch::{ByteStreamHandler, GetHandler, HandlerRegistry, SetHandler, MAX_HANDLERS};
pub use link::{Link, LinkError};
pub use traits::SerialPort;
