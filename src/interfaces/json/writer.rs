use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Writes results as pretty-printed JSON documents, one per call.
pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, value)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classification::classify;
    use crate::domain::order::OrderStatusResponse;

    #[test]
    fn test_writer_outputs_classification() {
        let mut buffer = Vec::new();
        let mut writer = JsonWriter::new(&mut buffer);
        writer
            .write(&classify(&OrderStatusResponse::default()))
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("\"result\": \"FAILURE\""));
        assert!(output.ends_with('\n'));
    }
}
