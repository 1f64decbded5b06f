//! Redis protocol front end
//!
//! This module provides RESP (REdis Serialization Protocol) parsing and the
//! `SET` / `GET` / `HAS` commands that expose the key registry over it.

pub mod command;
pub mod get;
pub mod has;
pub mod resp;
pub mod set;

pub use command::{Command, CommandFactory};
pub use resp::{ParseError, Parser, Value};
