//! Ordered, unversioned primitive streams used to save and load bodies.
//!
//! Nothing in the stream describes itself: a reader must ask for fields in
//! exactly the order they were written.

use std::io;
use std::io::Read;
use std::io::Write;

use cgmath::Vector3;

use crate::error::PersistError;

pub trait Writer {
    fn write_f64(&mut self, value: f64) -> Result<(), PersistError>;

    fn write_bool(&mut self, value: bool) -> Result<(), PersistError>;

    fn write_vector3(&mut self, v: Vector3<f64>) -> Result<(), PersistError> {
        self.write_f64(v.x)?;
        self.write_f64(v.y)?;
        self.write_f64(v.z)
    }
}

/// `field` names what is being read, for error reporting only.
pub trait Reader {
    fn read_f64(&mut self, field: &'static str) -> Result<f64, PersistError>;

    fn read_bool(&mut self, field: &'static str) -> Result<bool, PersistError>;

    fn read_vector3(&mut self, field: &'static str) -> Result<Vector3<f64>, PersistError> {
        let x = self.read_f64(field)?;
        let y = self.read_f64(field)?;
        let z = self.read_f64(field)?;
        Ok(Vector3::new(x, y, z))
    }
}

/// Little-endian binary writer over any [`io::Write`].
pub struct StreamWriter<W: Write> {
    inner: W,
}

impl<W: Write> StreamWriter<W> {
    pub fn new(inner: W) -> Self {
        StreamWriter { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Writer for StreamWriter<W> {
    fn write_f64(&mut self, value: f64) -> Result<(), PersistError> {
        self.inner.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    fn write_bool(&mut self, value: bool) -> Result<(), PersistError> {
        self.inner.write_all(&[u8::from(value)])?;
        Ok(())
    }
}

/// Little-endian binary reader over any [`io::Read`].
pub struct StreamReader<R: Read> {
    inner: R,
}

impl<R: Read> StreamReader<R> {
    pub fn new(inner: R) -> Self {
        StreamReader { inner }
    }

    fn fill(&mut self, buf: &mut [u8], field: &'static str) -> Result<(), PersistError> {
        self.inner.read_exact(buf).map_err(|err| match err.kind() {
            io::ErrorKind::UnexpectedEof => PersistError::UnexpectedEof { field },
            _ => PersistError::Io(err),
        })
    }
}

impl<R: Read> Reader for StreamReader<R> {
    fn read_f64(&mut self, field: &'static str) -> Result<f64, PersistError> {
        let mut buf = [0u8; 8];
        self.fill(&mut buf, field)?;
        Ok(f64::from_le_bytes(buf))
    }

    fn read_bool(&mut self, field: &'static str) -> Result<bool, PersistError> {
        let mut buf = [0u8; 1];
        self.fill(&mut buf, field)?;
        match buf[0] {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(PersistError::InvalidBool { field, value }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unplugged;

    impl Read for Unplugged {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "device unplugged"))
        }
    }

    #[test]
    fn f64_is_eight_little_endian_bytes() {
        let mut w = StreamWriter::new(Vec::new());
        w.write_f64(1.0).unwrap();
        assert_eq!(w.into_inner(), 1.0f64.to_le_bytes().to_vec());
    }

    #[test]
    fn values_come_back_in_order() {
        let mut w = StreamWriter::new(Vec::new());
        w.write_vector3(Vector3::new(1.5, -2.0, 3.25)).unwrap();
        w.write_bool(true).unwrap();
        w.write_f64(f64::MIN_POSITIVE).unwrap();
        let bytes = w.into_inner();
        assert_eq!(bytes.len(), 3 * 8 + 1 + 8);

        let mut r = StreamReader::new(bytes.as_slice());
        assert_eq!(r.read_vector3("v").unwrap(), Vector3::new(1.5, -2.0, 3.25));
        assert!(r.read_bool("b").unwrap());
        assert_eq!(r.read_f64("f").unwrap(), f64::MIN_POSITIVE);
    }

    #[test]
    fn short_stream_names_the_field() {
        let bytes = [0u8; 5];
        let mut r = StreamReader::new(&bytes[..]);
        match r.read_f64("mass") {
            Err(PersistError::UnexpectedEof { field }) => assert_eq!(field, "mass"),
            other => panic!("expected eof, got {:?}", other),
        }
    }

    #[test]
    fn bool_rejects_other_bytes() {
        let bytes = [2u8];
        let mut r = StreamReader::new(&bytes[..]);
        assert!(matches!(
            r.read_bool("enabled"),
            Err(PersistError::InvalidBool { field: "enabled", value: 2 })
        ));
    }

    #[test]
    fn other_read_failures_pass_through() {
        let mut r = StreamReader::new(Unplugged);
        match r.read_f64("torque") {
            Err(PersistError::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected i/o error, got {:?}", other),
        }
        assert!(matches!(r.read_bool("enabled"), Err(PersistError::Io(_))));
    }
}
