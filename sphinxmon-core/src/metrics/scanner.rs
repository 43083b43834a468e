use crate::metrics::constants::REVERSE_BLOCK_SIZE;
use crate::metrics::error::ScanError;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::mem;
use std::path::Path;

/// Lines of a seekable source, newest (last) line first.
///
/// The source is read in fixed-size blocks from the end, so a consumer that
/// stops early never touches the head of the file. Dropping the iterator
/// releases the underlying handle.
pub struct ReverseLines<R> {
    reader: R,
    /// Offset of the first byte already pulled into `pending`.
    pos: u64,
    block_size: usize,
    /// Bytes read but not yet yielded.
    pending: Vec<u8>,
    at_tail: bool,
    done: bool,
}

impl ReverseLines<File> {
    pub fn open(path: &Path) -> Result<Self, ScanError> {
        let file = File::open(path).map_err(|e| ScanError::unavailable(path, e))?;
        Self::new(file).map_err(|e| ScanError::unavailable(path, e))
    }
}

impl<R: Read + Seek> ReverseLines<R> {
    pub fn new(reader: R) -> io::Result<Self> {
        Self::with_block_size(reader, REVERSE_BLOCK_SIZE)
    }

    pub fn with_block_size(mut reader: R, block_size: usize) -> io::Result<Self> {
        let pos = reader.seek(SeekFrom::End(0))?;

        Ok(Self {
            reader,
            pos,
            block_size: block_size.max(1),
            pending: Vec::new(),
            at_tail: true,
            done: false,
        })
    }

    fn read_previous_block(&mut self) -> io::Result<()> {
        let len = self.pos.min(self.block_size as u64);
        self.pos -= len;

        self.reader.seek(SeekFrom::Start(self.pos))?;
        let mut block = vec![0; len as usize];
        self.reader.read_exact(&mut block)?;

        block.extend_from_slice(&self.pending);
        self.pending = block;
        Ok(())
    }

    fn next_raw_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        loop {
            if let Some(idx) = self.pending.iter().rposition(|&b| b == b'\n') {
                let line = self.pending.split_off(idx + 1);
                self.pending.truncate(idx);
                return Ok(Some(line));
            }

            if self.pos == 0 {
                if self.done {
                    return Ok(None);
                }
                self.done = true;
                return Ok(Some(mem::take(&mut self.pending)));
            }

            self.read_previous_block()?;
        }
    }

    fn fuse(&mut self) {
        self.pos = 0;
        self.pending.clear();
        self.done = true;
    }
}

impl<R: Read + Seek> Iterator for ReverseLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut line = match self.next_raw_line() {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => {
                    self.fuse();
                    return Some(Err(e));
                }
            };

            // A file ending in '\n' has no empty last line.
            let at_tail = mem::replace(&mut self.at_tail, false);
            if at_tail && line.is_empty() {
                continue;
            }

            if line.last() == Some(&b'\r') {
                line.pop();
            }

            return Some(Ok(String::from_utf8_lossy(&line).into_owned()));
        }
    }
}
