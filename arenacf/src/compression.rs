crate::eyre_imports!();

/// Run-length scheme used by compression type 0x04 image files.
///
/// A control byte with the high bit set repeats the following byte
/// `code - 0x7F` times (1..=128); otherwise `code + 1` literal bytes follow
/// (1..=128).
pub fn decode_rle(src: &[u8], decompressed_size: usize) -> eyre::Result<Vec<u8>> {
    let mut dst: Vec<u8> = Vec::with_capacity(decompressed_size);
    let mut pos = 0usize;

    while dst.len() < decompressed_size {
        let Some(&code) = src.get(pos) else {
            bail!(
                "Run-length data ended early ({} of {decompressed_size} bytes decoded).",
                dst.len()
            );
        };
        pos += 1;

        if code & 0x80 != 0 {
            let count = code as usize - 0x7F;
            let Some(&value) = src.get(pos) else {
                bail!("Run-length data ended early inside a run.");
            };
            pos += 1;
            dst.extend(std::iter::repeat_n(value, count));
        } else {
            let count = code as usize + 1;
            let Some(literals) = src.get(pos..pos + count) else {
                bail!("Run-length data ended early inside a literal block.");
            };
            dst.extend_from_slice(literals);
            pos += count;
        }
    }

    if dst.len() != decompressed_size {
        bail!(
            "Run-length data overran the expected size ({} > {decompressed_size}).",
            dst.len()
        );
    }
    Ok(dst)
}
