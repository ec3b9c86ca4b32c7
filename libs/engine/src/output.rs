use std::io::{self, Write, BufWriter};
use std::fs::{self, File};
use std::path::Path;

use log::info;
use scopeguard::ScopeGuard;

use crate::table::Header;
use crate::MappingError;

/// The lines of a generated mapping file, written after the header
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MappingLines {
    pub header: Header,
    pub lines: Vec<String>,
}
impl MappingLines {
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
    pub fn write<W: Write>(&self, mut output: W) -> io::Result<()> {
        for line in self.header.lines().iter().chain(&self.lines) {
            output.write_all(line.as_bytes())?;
            output.write_all(b"\n")?;
        }
        output.flush()
    }
    pub fn write_string(&self) -> String {
        let mut buffer = Vec::new();
        self.write(&mut buffer).expect("Writes to a Vec are infallible");
        String::from_utf8(buffer).expect("Lines are valid UTF8")
    }
    /// Write the lines into the specified file.
    ///
    /// The file is removed again if anything fails,
    /// so a partially written file is never left behind.
    pub fn save(&self, location: &Path) -> Result<(), MappingError> {
        let file = File::create(location)
            .map_err(|cause| MappingError::io(location, cause))?;
        let cleanup = scopeguard::guard(location, |location| {
            let _ = fs::remove_file(location);
        });
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)
            .and_then(|()| writer.get_ref().sync_all())
            .map_err(|cause| MappingError::io(location, cause))?;
        ScopeGuard::into_inner(cleanup);
        info!("Wrote {} lines to {}", self.lines.len(), location.display());
        Ok(())
    }
}
