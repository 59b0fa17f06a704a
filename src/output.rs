//! The [`Output`] sink directives render into

use std::io;

use crate::error::RenderError;

/// Destination for rendered template content
pub trait Output {
    /// Append a chunk of rendered text
    fn write_str(&mut self, value: &str) -> Result<(), RenderError>;
}

impl<O> Output for &mut O
where
    O: Output,
{
    fn write_str(&mut self, value: &str) -> Result<(), RenderError> {
        O::write_str(self, value)
    }
}

impl Output for String {
    fn write_str(&mut self, value: &str) -> Result<(), RenderError> {
        self.push_str(value);
        Ok(())
    }
}

impl Output for Vec<u8> {
    fn write_str(&mut self, value: &str) -> Result<(), RenderError> {
        self.extend_from_slice(value.as_bytes());
        Ok(())
    }
}

/// Adapter rendering into any [`io::Write`]
pub struct IoOutput<W>(pub W);

impl<W> Output for IoOutput<W>
where
    W: io::Write,
{
    fn write_str(&mut self, value: &str) -> Result<(), RenderError> {
        self.0.write_all(value.as_bytes())?;
        Ok(())
    }
}
