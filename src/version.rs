/// FBX format version read from (or written to) the file header.
///
/// Known version families:
/// - 6100: FBX 2006 (binary layout shared with 7.x up to header widths)
/// - 7100..=7400: FBX 2011–2014, 32-bit record header fields
/// - 7500+: FBX 2016+, 64-bit record header fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormatVersion(pub u32);

impl FormatVersion {
    pub const V7400: Self = Self(7400);
    pub const V7500: Self = Self(7500);

    /// Number of all-zero footer blocks terminating the top-level record list.
    pub const FOOTER_BLOCKS: usize = 7;

    /// Whether record header fields (end offset, property count, property
    /// byte length) are 64-bit. Older families use 32-bit fields. This is an
    /// explicit layout switch; it is never inferred from file content.
    pub fn wide_headers(self) -> bool {
        self.0 >= 7500
    }

    /// Byte width of a single record header field.
    pub fn header_field_len(self) -> usize {
        if self.wide_headers() {
            8
        } else {
            4
        }
    }

    /// Byte length of an all-zero record: three header fields plus the name
    /// length byte. This is also the footer block size.
    pub fn null_record_len(self) -> usize {
        3 * self.header_field_len() + 1
    }

    /// Total footer padding length after the last top-level record.
    pub fn footer_len(self) -> usize {
        self.null_record_len() * Self::FOOTER_BLOCKS
    }
}

impl std::fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
