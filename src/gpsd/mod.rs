mod reader;
mod report;

pub use reader::{ReaderError, acquire_fix};

#[cfg(test)]
pub(crate) use reader::tests::{TPV, TPV_NO_FIX, VERSION, fake_daemon};
