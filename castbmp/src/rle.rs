//! Packbits-style run-length decompression.
//!
//! ```plain
//! .- repeat run -------------------------------------.
//! |         Byte[0]         |         Byte[1]         |
//! |  7  6  5  4  3  2  1  0 |  7  6  5  4  3  2  1  0 |
//! |--+----------------------+-------------------------|
//! |  1 |     257 - count    |          fill           |
//! `---------------------------------------------------`
//! ```
//!
//! - control byte `>= 128`: the next byte is written `257 - control` times (2..=129)
//!
//! ```plain
//! .- literal run ------------------------------------------.
//! |         Byte[0]         |  Byte[1] .. Byte[count]      |
//! |  7  6  5  4  3  2  1  0 |                              |
//! |--+----------------------+------------------------------|
//! |  0 |     count - 1      |  raw indices                 |
//! `--------------------------------------------------------`
//! ```
//!
//! - control byte `< 128`: the next `control + 1` bytes are copied verbatim (1..=128)
//!
//! Decoding ends when the input is exhausted. There is no end marker.

use crate::{
    cursor::ByteCursor,
    decode::{BufferOverflowSnafu, DecodeError, TruncatedSnafu},
};
use alloc::{vec, vec::Vec};
use snafu::{ensure, ResultExt};

/// Decompresses `data` into a zero-initialised index buffer of exactly `len` entries.
pub fn decompress(data: &[u8], len: usize) -> Result<Vec<u8>, DecodeError> {
    let mut output = vec![0; len];
    let written = decompress_into(data, &mut output)?;

    tracing::debug!(
        input = data.len(),
        written,
        capacity = len,
        "decompressed cast bitmap payload"
    );

    Ok(output)
}

/// Decompresses `data` into `output`, returning the number of entries written.
///
/// Entries past the returned count are left untouched.
pub fn decompress_into(data: &[u8], output: &mut [u8]) -> Result<usize, DecodeError> {
    let capacity = output.len();
    let mut cursor = ByteCursor::new(data);
    let mut pos = 0;

    while cursor.available() {
        let control = cursor.read_u8().context(TruncatedSnafu)?;

        if control >= 128 {
            let count = 257 - usize::from(control);
            let fill = cursor.read_u8().context(TruncatedSnafu)?;

            ensure!(count <= capacity - pos, BufferOverflowSnafu { capacity });
            output[pos..pos + count].fill(fill);
            pos += count;
        } else {
            let count = usize::from(control) + 1;
            let literal = cursor.take(count).context(TruncatedSnafu)?;

            ensure!(count <= capacity - pos, BufferOverflowSnafu { capacity });
            output[pos..pos + count].copy_from_slice(literal);
            pos += count;
        }
    }

    Ok(pos)
}
