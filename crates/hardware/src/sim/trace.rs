//! Memory trace records and the line-oriented trace reader.
//!
//! A trace is a text file with one access per line:
//!
//! ```text
//! I 0400d7d4,8
//!  M 0421c7f0,4
//!  L 04f6b868,8
//!  S 7ff0005c8,8
//! ```
//!
//! Leading whitespace is ignored and blank lines are skipped. The address is
//! hexadecimal (an optional `0x` prefix is accepted), the size a decimal integer.
//! Any single-character operation parses; only `I`, `L`, `S` and `M` mean something.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::common::error::{MalformedRecord, RecordParseError, TraceError};

/// Operation of a trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraceOp {
    /// `I`: instruction fetch. Never touches the data cache.
    Instruction,
    /// `L`: data load. One access.
    Load,
    /// `S`: data store. One access.
    Store,
    /// `M`: data modify (load then store). Two accesses to the same address.
    Modify,
    /// Any other character. Ignored.
    Other(char),
}

impl TraceOp {
    /// The operation character as written in a trace.
    pub const fn as_char(self) -> char {
        match self {
            Self::Instruction => 'I',
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
            Self::Other(c) => c,
        }
    }

    /// Number of cache accesses this operation performs.
    pub const fn access_count(self) -> usize {
        match self {
            Self::Instruction | Self::Other(_) => 0,
            Self::Load | Self::Store => 1,
            Self::Modify => 2,
        }
    }
}

impl From<char> for TraceOp {
    fn from(c: char) -> Self {
        match c {
            'I' => Self::Instruction,
            'L' => Self::Load,
            'S' => Self::Store,
            'M' => Self::Modify,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for TraceOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One parsed trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// What kind of access.
    pub op: TraceOp,
    /// Accessed address.
    pub address: u64,
    /// Access size in bytes, as written. Not used by the cache model.
    pub size: i32,
}

impl TraceRecord {
    /// Builds a record.
    pub const fn new(op: TraceOp, address: u64, size: i32) -> Self {
        Self { op, address, size }
    }
}

/// Formats as `<op> <hex-address>,<size>`, the form used by the verbose echo.
impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.op, self.address, self.size)
    }
}

impl FromStr for TraceRecord {
    type Err = RecordParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut chars = line.trim_start().chars();
        let op = chars.next().ok_or(RecordParseError::MissingOperation)?;
        let rest = chars.as_str().trim_start();

        let (addr_text, size_text) = rest.split_once(',').ok_or(RecordParseError::MissingSize)?;
        let address = parse_hex(addr_text)?;

        let size_text = size_text.trim();
        let size = size_text
            .parse::<i32>()
            .map_err(|_| RecordParseError::InvalidSize(size_text.to_owned()))?;

        Ok(Self::new(TraceOp::from(op), address, size))
    }
}

/// Parses a hexadecimal address with an optional `0x`/`0X` prefix.
fn parse_hex(text: &str) -> Result<u64, RecordParseError> {
    if text.is_empty() {
        return Err(RecordParseError::MissingAddress);
    }
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    // from_str_radix would also take a sign
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(RecordParseError::InvalidAddress(text.to_owned()));
    }
    u64::from_str_radix(digits, 16).map_err(|_| RecordParseError::InvalidAddress(text.to_owned()))
}

/// Lazy, line-by-line reader of trace records.
///
/// Yields `Ok(record)` per non-blank line, `Err(TraceError::Malformed)` for a line
/// that does not parse (the reader keeps going after it; the caller decides whether
/// to stop), and `Err(TraceError::Read)` once if the underlying reader fails, after
/// which iteration ends.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    buf: String,
    line: usize,
    failed: bool,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps any buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
            failed: false,
        }
    }

    /// Number of lines consumed so far, blank ones included.
    pub const fn lines_read(&self) -> usize {
        self.line
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Open`] if the file is missing or unreadable.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TraceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            self.buf.clear();
            self.line += 1;
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => {
                    self.line -= 1;
                    return None;
                }
                Ok(_) => {}
                Err(source) => {
                    self.failed = true;
                    return Some(Err(TraceError::Read {
                        line: self.line,
                        source,
                    }));
                }
            }

            let content = self.buf.trim_end_matches(['\n', '\r']);
            if content.trim().is_empty() {
                continue;
            }
            return Some(content.parse::<TraceRecord>().map_err(|reason| {
                TraceError::Malformed(MalformedRecord {
                    line: self.line,
                    content: content.to_owned(),
                    reason,
                })
            }));
        }
    }
}
