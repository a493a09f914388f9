use std::fs::File;
use std::io::{Error, ErrorKind, Stderr, Stdout, Write};

pub struct Writer {
    buffer: WriteBuffer,
    err: WriteBuffer,
}

impl Default for Writer {
    fn default() -> Self {
        Self {
            buffer: WriteBuffer::Vec(vec![]),
            err: WriteBuffer::Vec(vec![]),
        }
    }
}

impl Writer {
    pub fn new(buffer: WriteBuffer, err: WriteBuffer) -> Self {
        Self { buffer, err }
    }

    pub fn write_err(&mut self, msg: String) -> std::io::Result<()> {
        writeln!(self.err, "{msg}")
    }

    /// Contents written so far. Only in-memory buffers can be read back.
    pub fn into_string(self) -> std::io::Result<String> {
        self.buffer.into_string()
    }

    pub fn err_to_string(self) -> std::io::Result<String> {
        self.err.into_string()
    }
}

impl Write for Writer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.buffer.flush()
    }
}

pub enum WriteBuffer {
    Stdout(Stdout),
    Stderr(Stderr),
    Vec(Vec<u8>),
    File(File),
}

impl WriteBuffer {
    fn into_string(self) -> std::io::Result<String> {
        match self {
            WriteBuffer::Vec(vec) => {
                String::from_utf8(vec).map_err(|e| Error::new(ErrorKind::InvalidData, e))
            }
            WriteBuffer::Stdout(..) | WriteBuffer::Stderr(..) | WriteBuffer::File(..) => Err(
                Error::new(ErrorKind::Unsupported, "only in-memory output can be read back"),
            ),
        }
    }
}

impl Write for WriteBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            WriteBuffer::Stdout(stdout) => stdout.write(buf),
            WriteBuffer::Stderr(stderr) => stderr.write(buf),
            WriteBuffer::Vec(vec) => vec.write(buf),
            WriteBuffer::File(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            WriteBuffer::Stdout(stdout) => stdout.flush(),
            WriteBuffer::Stderr(stderr) => stderr.flush(),
            WriteBuffer::Vec(vec) => vec.flush(),
            WriteBuffer::File(file) => file.flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_buffers_read_back() {
        let mut writer = Writer::default();
        write!(writer, "compiled").unwrap();
        assert_eq!("compiled", writer.into_string().unwrap());
    }

    #[test]
    fn test_stdout_cannot_be_read_back() {
        let writer = Writer::new(
            WriteBuffer::Stdout(std::io::stdout()),
            WriteBuffer::Stderr(std::io::stderr()),
        );
        let err = writer.into_string().unwrap_err();
        assert_eq!(ErrorKind::Unsupported, err.kind());
    }
}
