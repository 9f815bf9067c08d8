use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};

/// Byte-addressable destination of a ROM image.
pub(crate) trait ByteSink {
    /// Writes `bytes` at `offset` and returns how many were written.
    fn write_at(&mut self, bytes: &[u8], offset: u64) -> io::Result<usize>;
}

impl ByteSink for File {
    fn write_at(&mut self, bytes: &[u8], offset: u64) -> io::Result<usize> {
        self.seek(SeekFrom::Start(offset))?;
        self.write(bytes)
    }
}

impl ByteSink for Vec<u8> {
    fn write_at(&mut self, bytes: &[u8], offset: u64) -> io::Result<usize> {
        let start = usize::try_from(offset)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "offset out of range"))?;
        let end = start + bytes.len();
        if self.len() < end {
            self.resize(end, 0);
        }
        self[start..end].copy_from_slice(bytes);
        Ok(bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_grows() {
        let mut sink: Vec<u8> = Vec::new();
        assert_eq!(sink.write_at(&[0xAB], 4).unwrap(), 1);
        assert_eq!(sink, vec![0, 0, 0, 0, 0xAB]);
        assert_eq!(sink.write_at(&[1, 2], 0).unwrap(), 2);
        assert_eq!(sink, vec![1, 2, 0, 0, 0xAB]);
    }

    #[test]
    fn test_file_sink_writes_at_offset() {
        let path = std::env::temp_dir().join(format!("microcode_sink_{}.bin", std::process::id()));
        {
            let mut file = File::create(&path).unwrap();
            file.write_at(&[0x11], 3).unwrap();
            file.write_at(&[0x22], 1).unwrap();
        }
        let contents = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(contents, vec![0, 0x22, 0, 0x11]);
    }
}
