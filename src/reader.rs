use crate::error::Result;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

/// Reads raw candidates, one per line. Blank lines are skipped; `-` reads
/// standard input.
pub struct Reader<R> {
    source: R,
}

impl Reader<Box<dyn BufRead>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source: Box<dyn BufRead> = if path == Path::new("-") {
            Box::new(BufReader::new(io::stdin()))
        } else {
            Box::new(BufReader::new(File::open(path)?))
        };
        Ok(Reader { source })
    }
}

impl<R: BufRead> Reader<R> {
    pub fn new(source: R) -> Self {
        Reader { source }
    }

    pub fn read(self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        for line in self.source.lines() {
            let line = line?;
            // Byte order marks survive some OCR exports.
            let line = line.trim_start_matches('\u{FEFF}').trim();
            if !line.is_empty() {
                lines.push(line.to_owned());
            }
        }
        Ok(lines)
    }
}
