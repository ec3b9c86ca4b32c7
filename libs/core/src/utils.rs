use std::io::{self, Write};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use failure::Error;
use failure_derive::Fail;
use curl::easy::Easy;

#[inline]
pub fn download_buffer(url: &str) -> Result<Vec<u8>, Error> {
    let mut buffer = Vec::with_capacity(2048);
    download(url, &mut buffer)?;
    Ok(buffer)
}

/// Download the url into the specified file.
///
/// The transfer goes into a `.part` file next to the target,
/// which is only renamed into place once it's complete.
/// An interrupted download never leaves a truncated target behind.
pub fn download_file(url: &str, target: &Path) -> Result<(), Error> {
    let partial = partial_path(target);
    let result = File::create(&partial).map_err(Error::from).and_then(|mut file| {
        download(url, &mut file)?;
        file.sync_all()?;
        Ok(())
    });
    match result {
        Ok(()) => Ok(fs::rename(&partial, target)?),
        Err(e) => {
            let _ = fs::remove_file(&partial);
            Err(e)
        }
    }
}

fn partial_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    name.push(".part");
    target.with_file_name(name)
}

fn download<W: Write>(url: &str, output: &mut W) -> Result<(), Error> {
    let mut easy = Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.fail_on_error(true)?;
    let mut write_error: Option<io::Error> = None;
    let result = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match output.write_all(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => {
                // Aborts the transfer
                write_error = Some(e);
                Ok(0)
            }
        })?;
        transfer.perform()
    };
    let not_found = result.is_err() && easy.response_code()? == 404;
    match (result, write_error) {
        (_, Some(e)) => Err(e.into()),
        (Err(_), None) if not_found => Err(HttpNotFound.into()),
        (Err(e), None) => Err(e.into()),
        (Ok(()), None) => Ok(()),
    }
}
#[derive(Debug, Fail)]
#[fail(display = "HTTP 404 not found")]
pub struct HttpNotFound;

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn partial_file_next_to_target() {
        assert_eq!(
            partial_path(Path::new("builddata-1.20.4/mojmaps-1.20.4.txt")),
            PathBuf::from("builddata-1.20.4/mojmaps-1.20.4.txt.part")
        );
    }
}
