use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use bzip2::read::BzDecoder;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::AcquireError;
use crate::model::lexicon::{BUILTIN_LEXICON, Lexicon};
use crate::utils::paths::{get_lexicon_path, is_remote_source, source_extension};

pub const BUILTIN_SOURCE: &str = "builtin";

pub fn fetch_package(source: &str, timeout: Option<Duration>) -> Result<Vec<u8>, AcquireError> {
    if source == BUILTIN_SOURCE {
        return Ok(BUILTIN_LEXICON.as_bytes().to_vec());
    }

    if is_remote_source(source) {
        info!("downloading model package from {}", source);
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        let resp = client.get(source).send()?;
        if !resp.status().is_success() {
            return Err(AcquireError::Status(resp.status().as_u16()));
        }
        return Ok(resp.bytes()?.to_vec());
    }

    info!("copying model package from {}", source);
    Ok(fs::read(source)?)
}

// Decompresses by extension and checks that the result is a usable lexicon
// before anything touches the model directory.
pub fn decode_package(source: &str, bytes: Vec<u8>) -> Result<Vec<u8>, AcquireError> {
    let decoded = match source_extension(source) {
        Some("zst") => zstd::stream::decode_all(bytes.as_slice()).map_err(AcquireError::decode)?,
        Some("bz2") => {
            let mut out = Vec::new();
            BzDecoder::new(bytes.as_slice())
                .read_to_end(&mut out)
                .map_err(AcquireError::decode)?;
            out
        }
        _ => bytes,
    };

    Lexicon::from_slice(&decoded).map_err(AcquireError::Decode)?;
    Ok(decoded)
}

pub fn install_package(package_path: &Path, bytes: &[u8]) -> Result<(), AcquireError> {
    fs::create_dir_all(package_path)?;

    // Readers either see the old lexicon or the complete new one.
    let mut tmp = NamedTempFile::new_in(package_path)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(get_lexicon_path(package_path))
        .map_err(|e| AcquireError::Io(e.error))?;

    info!("installed model package into {}", package_path.display());
    Ok(())
}
