crate::eyre_imports!();
use std::fs::File;
use std::io::prelude::*;
use std::path::PathBuf;

use super::math::downcast_ceil_usize;

/// Read a whole asset file into memory, returning its bare file name together
/// with the buffer. The formats involved are small enough that slurping the
/// file beats seeking around in it.
pub fn read_binary(file_path: PathBuf) -> eyre::Result<(String, Vec<u8>)> {
    let file_name = file_path
        .file_name()
        .expect("Provided file path without filename.")
        .to_string_lossy()
        .into_owned();
    let file_path = file_path
        .canonicalize()
        .wrap_err_with(|| format!("Check {file_name} path"))?;

    let mut file_handle =
        File::open(&file_path).wrap_err_with(|| format!("Open asset file at '{file_name}'"))?;
    let file_metadata = file_handle
        .metadata()
        .wrap_err_with(|| format!("Get {file_name} metadata"))?;
    let file_size = downcast_ceil_usize(file_metadata.len());

    let mut buf = vec![0; file_size];
    file_handle
        .read_exact(buf.as_mut())
        .wrap_err_with(|| format!("Read '{file_name}'"))?;

    Ok((file_name, buf))
}
