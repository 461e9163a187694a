use crate::{
    consts::*,
    cursor::ByteCursor,
    decode::{
        DecodeError, DecodeOptions, InvalidFormatSnafu, PayloadLengthMismatchSnafu, TooLargeSnafu,
        TruncatedSnafu,
    },
};
use byteorder::{BigEndian, LittleEndian};
use snafu::{ensure, ResultExt};

/// Visible sub-region of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i16,
    pub top: i16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Builds a rect from its edges. Returns `None` unless both dimensions are positive.
    pub fn from_edges(top: i16, left: i16, bottom: i16, right: i16) -> Option<Self> {
        let width = i32::from(right) - i32::from(left);
        let height = i32::from(bottom) - i32::from(top);

        Some(Self {
            left,
            top,
            width: u16::try_from(width).ok().filter(|&w| w > 0)?,
            height: u16::try_from(height).ok().filter(|&h| h > 0)?,
        })
    }
}

/// Cast bitmap header.
///
/// The `reserved*` fields, `unknown` and `tag` are kept as read. Their meaning is not known and
/// none of them influence decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Row stride of the index buffer, in entries.
    pub total_width: u16,
    pub rect: Rect,
    pub reserved1: u8,
    pub reserved2: [u8; 7],
    pub reserved3: u16,
    pub reserved4: u16,
    pub reserved5: u8,
    pub bit_depth: u8,
    pub palette_kind: i32,
    pub unknown: u32,
    pub tag: [u8; 4],
    /// Payload length as declared by the file. Advisory unless
    /// [`DecodeOptions::enforce_payload_length`] is set.
    pub declared_payload_length: u32,
}

impl Header {
    /// Size of the header including the cast properties preamble.
    pub const SIZE: usize = 68;

    /// Parses the header, leaving `cursor` at the start of the run-length payload.
    pub fn parse(
        cursor: &mut ByteCursor<'_>,
        options: &DecodeOptions,
    ) -> Result<Self, DecodeError> {
        cursor.skip(CAST_PROPERTIES_OFFSET).context(TruncatedSnafu)?;

        let total_width = cursor.read_u16::<BigEndian>().context(TruncatedSnafu)?;
        let total_width = total_width & TOTAL_WIDTH_MASK;

        let top = cursor.read_i16::<BigEndian>().context(TruncatedSnafu)?;
        let left = cursor.read_i16::<BigEndian>().context(TruncatedSnafu)?;
        let bottom = cursor.read_i16::<BigEndian>().context(TruncatedSnafu)?;
        let right = cursor.read_i16::<BigEndian>().context(TruncatedSnafu)?;

        let reserved1 = cursor.read_u8().context(TruncatedSnafu)?;
        let reserved2 = cursor.read_array::<7>().context(TruncatedSnafu)?;
        let reserved3 = cursor.read_u16::<BigEndian>().context(TruncatedSnafu)?;
        let reserved4 = cursor.read_u16::<BigEndian>().context(TruncatedSnafu)?;
        let reserved5 = cursor.read_u8().context(TruncatedSnafu)?;

        let bit_depth = cursor.read_u8().context(TruncatedSnafu)?;
        ensure!(bit_depth == BIT_DEPTH, InvalidFormatSnafu { field: "bitDepth" });

        let palette_kind = cursor.read_i32::<BigEndian>().context(TruncatedSnafu)?;
        ensure!(
            palette_kind.wrapping_sub(1) == PALETTE_KIND_GRAYSCALE,
            InvalidFormatSnafu {
                field: "paletteKind"
            }
        );

        let unknown = cursor.read_u32::<LittleEndian>().context(TruncatedSnafu)?;
        let tag = cursor.read_array::<4>().context(TruncatedSnafu)?;
        ensure!(
            !options.require_tag || tag == BITD_TAG,
            InvalidFormatSnafu { field: "tag" }
        );

        let declared_payload_length =
            cursor.read_u32::<LittleEndian>().context(TruncatedSnafu)?;

        let rect = Rect::from_edges(top, left, bottom, right)
            .ok_or(DecodeError::InvalidFormat { field: "rect" })?;

        let pixels = (usize::from(total_width) * usize::from(rect.height))
            .max(usize::from(rect.width) * usize::from(rect.height));
        ensure!(
            pixels <= options.max_pixels,
            TooLargeSnafu {
                pixels,
                max: options.max_pixels
            }
        );

        let actual = cursor.remaining();
        if declared_payload_length as usize != actual {
            ensure!(
                !options.enforce_payload_length,
                PayloadLengthMismatchSnafu {
                    declared: declared_payload_length,
                    actual
                }
            );
            tracing::warn!(
                declared = declared_payload_length,
                actual,
                "payload length differs from header"
            );
        }

        let header = Header {
            total_width,
            rect,
            reserved1,
            reserved2,
            reserved3,
            reserved4,
            reserved5,
            bit_depth,
            palette_kind,
            unknown,
            tag,
            declared_payload_length,
        };
        tracing::debug!(
            total_width,
            rect = ?header.rect,
            declared_payload_length,
            "parsed cast bitmap header"
        );

        Ok(header)
    }

    /// Number of entries in the decoded index buffer.
    pub fn index_buffer_len(&self) -> usize {
        usize::from(self.total_width) * usize::from(self.rect.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Builds a header with the given geometry and payload, all other fields valid.
    fn header_bytes(total_width: u16, rect: [i16; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&[0xAA; CAST_PROPERTIES_OFFSET]);
        out.extend_from_slice(&(total_width | 0x8000).to_be_bytes());
        for edge in rect {
            out.extend_from_slice(&edge.to_be_bytes());
        }
        out.push(0);
        out.extend_from_slice(&[0; 7]);
        out.extend_from_slice(&0x0102u16.to_be_bytes());
        out.extend_from_slice(&0x0304u16.to_be_bytes());
        out.push(0);
        out.push(BIT_DEPTH);
        out.extend_from_slice(&(PALETTE_KIND_GRAYSCALE + 1).to_be_bytes());
        out.extend_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
        out.extend_from_slice(&BITD_TAG);
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(payload);
        out
    }

    fn parse(data: &[u8], options: &DecodeOptions) -> Result<Header, DecodeError> {
        Header::parse(&mut ByteCursor::new(data), options)
    }

    #[test]
    fn parses_geometry_and_masks_width_flag() {
        let data = header_bytes(6, [10, 20, 13, 24], &[0x00, 0x07]);
        let mut cursor = ByteCursor::new(&data);
        let header = Header::parse(&mut cursor, &DecodeOptions::default()).unwrap();

        assert_eq!(header.total_width, 6);
        assert_eq!(
            header.rect,
            Rect {
                left: 20,
                top: 10,
                width: 4,
                height: 3
            }
        );
        assert_eq!(header.reserved3, 0x0102);
        assert_eq!(header.reserved4, 0x0304);
        assert_eq!(header.unknown, 0xDEAD_BEEF);
        assert_eq!(header.declared_payload_length, 2);
        assert_eq!(header.index_buffer_len(), 18);
        assert_eq!(cursor.position(), Header::SIZE);
        assert_eq!(cursor.rest(), &[0x00, 0x07]);
    }

    #[test]
    fn rejects_bit_depth_other_than_8() {
        let mut data = header_bytes(2, [0, 0, 1, 2], &[]);
        data[51] = 4;

        let err = parse(&data, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidFormat { field: "bitDepth" }));
    }

    #[test]
    fn rejects_non_grayscale_palette_kind() {
        let mut data = header_bytes(2, [0, 0, 1, 2], &[]);
        data[52..56].copy_from_slice(&(-3i32).to_be_bytes());

        let err = parse(&data, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidFormat {
                field: "paletteKind"
            }
        ));
    }

    #[test]
    fn rejects_empty_or_inverted_rect() {
        for rect in [[0, 0, 0, 2], [0, 5, 1, 2]] {
            let data = header_bytes(2, rect, &[]);
            let err = parse(&data, &DecodeOptions::default()).unwrap_err();
            assert!(matches!(err, DecodeError::InvalidFormat { field: "rect" }));
        }
    }

    #[test]
    fn short_input_is_truncated() {
        let data = header_bytes(2, [0, 0, 1, 2], &[]);

        for len in [0, 27, 30, 51, 60, Header::SIZE - 1] {
            let err = parse(&data[..len], &DecodeOptions::default()).unwrap_err();
            assert!(matches!(err, DecodeError::Truncated { .. }), "len {len}");
        }
    }

    #[test]
    fn oversized_geometry_is_rejected_before_allocating() {
        let data = header_bytes(0x7FFF, [i16::MIN, i16::MIN, i16::MAX, i16::MAX], &[]);

        let err = parse(&data, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TooLarge {
                pixels: 4_294_836_225,
                max: MAX_PIXELS
            }
        ));
    }

    #[test]
    fn limit_covers_stride_and_visible_area() {
        let options = DecodeOptions {
            max_pixels: 12,
            ..Default::default()
        };

        // 6 x 2 stride, 4 x 2 visible
        assert!(parse(&header_bytes(6, [0, 0, 2, 4], &[]), &options).is_ok());
        // 7 x 2 stride
        let err = parse(&header_bytes(7, [0, 0, 2, 4], &[]), &options).unwrap_err();
        assert!(matches!(err, DecodeError::TooLarge { pixels: 14, max: 12 }));
        // 2 x 7 stride, 3 x 7 visible
        let err = parse(&header_bytes(2, [0, 0, 7, 3], &[]), &options).unwrap_err();
        assert!(matches!(err, DecodeError::TooLarge { pixels: 21, max: 12 }));
    }

    #[test]
    fn tag_is_only_checked_on_request() {
        let mut data = header_bytes(2, [0, 0, 1, 2], &[]);
        data[60..64].copy_from_slice(b"XXXX");

        assert!(parse(&data, &DecodeOptions::default()).is_ok());

        let options = DecodeOptions {
            require_tag: true,
            ..Default::default()
        };
        let err = parse(&data, &options).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidFormat { field: "tag" }));
    }

    #[test]
    fn payload_length_is_advisory_unless_enforced() {
        let mut data = header_bytes(2, [0, 0, 1, 2], &[0x01, 0x05, 0x06]);
        data[64..68].copy_from_slice(&10u32.to_le_bytes());

        assert!(parse(&data, &DecodeOptions::default()).is_ok());

        let options = DecodeOptions {
            enforce_payload_length: true,
            ..Default::default()
        };
        let err = parse(&data, &options).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::PayloadLengthMismatch {
                declared: 10,
                actual: 3
            }
        ));
    }
}
