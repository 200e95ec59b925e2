use crate::domain::model::Letter;
use crate::utils::error::Result;

/// Destination for apology letters. Opened once per process and flushed on
/// shutdown.
pub trait LetterSink {
    fn write_letter(&mut self, letter: &Letter) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

pub trait ConfigProvider {
    fn seed_path(&self) -> &str;
    fn letters_path(&self) -> &str;
    fn append_letters(&self) -> bool;
    fn organization(&self) -> &str;
    fn reminder_after(&self) -> u32;
    fn show_greeting(&self) -> bool;
}
