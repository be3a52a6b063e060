/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX checksum (tag 10).
//!
//! The checksum is the byte sum of everything preceding the `10=` field,
//! modulo 256, written as three zero-padded digits.

/// Calculates the FIX checksum for the given data.
///
/// # Example
/// ```
/// use fixpoll_tagvalue::calculate_checksum;
///
/// assert_eq!(calculate_checksum(b"ABC"), 198);
/// ```
#[inline]
#[must_use]
pub fn calculate_checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Formats a checksum value as three ASCII digits.
#[inline]
#[must_use]
pub fn format_checksum(checksum: u8) -> [u8; 3] {
    [
        b'0' + checksum / 100,
        b'0' + (checksum / 10) % 10,
        b'0' + checksum % 10,
    ]
}
