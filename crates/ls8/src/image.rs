//! Program images in the LS-8 text format.
//!
//! One value per line, written in binary. Anything after a `#` is a comment.
//! Lines that are blank or do not parse as binary are skipped:
//!
//! ```text
//! # print8.ls8
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! 01000111 # PRN R0
//! 00000000
//! 00000001 # HLT
//! ```

use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::fault::LoadError;
use crate::opcodes::MEMORY_SIZE;

pub fn parse(source: &str) -> Result<Vec<u8>, LoadError> {
    let mut image = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let code = line.split('#').next().unwrap_or("").trim();
        let Ok(value) = u64::from_str_radix(code, 2) else {
            if !code.is_empty() {
                trace!(line = index + 1, code, "skipping line");
            }
            continue;
        };
        let byte = u8::try_from(value).map_err(|_| LoadError::ValueOutOfRange {
            line: index + 1,
            value,
        })?;
        image.push(byte);
    }
    if image.len() > MEMORY_SIZE {
        return Err(LoadError::TooLarge {
            len: image.len(),
            max: MEMORY_SIZE,
        });
    }
    Ok(image)
}

pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    let image = parse(&source)?;
    debug!(path = %path.display(), len = image.len(), "read program image");
    Ok(image)
}
