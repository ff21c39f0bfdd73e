// If the usize type is smaller than u64 (e.g. on a 32 bit arch), return usize
// maximum value instead of truncating the number upper bytes.
pub fn downcast_ceil_usize(from: u64) -> usize {
    if from > usize::MAX as u64 {
        eprintln!(
            "Warning: downcasting u64 to usize required ceiling the value to usize maximum value"
        );
        usize::MAX
    } else {
        from as usize
    }
}
