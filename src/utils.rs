use std::io::{self, Read, Seek, SeekFrom};

/// Reads up to `buf.len()` bytes from `reader` starting at byte `offset`.
///
/// # Arguments
///
/// - `reader`: The image to read from.
/// - `offset`: The offset in bytes where reading starts.
/// - `buf`: The buffer to fill.
///
/// # Returns
///
/// The number of bytes actually read. It is smaller than `buf.len()` only when the
/// end of the image was reached.
///
/// # Errors
///
/// Returns an `io::Error` if seeking or reading fails.
pub fn read_at<T: Read + Seek>(reader: &mut T, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
    reader.seek(SeekFrom::Start(offset))?;

    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                return Err(io::Error::new(
                    err.kind(),
                    format!("Failed to read at offset {offset}: {err}"),
                ));
            }
        }
    }

    Ok(filled)
}
