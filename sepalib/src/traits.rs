//! Запись сообщений в std::io::Write.

use crate::{error::Result, message::DirectDebitInitiation};
use std::io::Write;

pub trait WriteMessage {
    fn write<W: Write>(w: W, msg: &DirectDebitInitiation) -> Result<()>;
}
