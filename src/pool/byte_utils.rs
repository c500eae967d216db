//! Primitive sizes and slot-level byte accessors.
//!
//! Layout tables throughout the crate are built from these constants, and
//! every attribute read or write on a slot ends up in one of the helpers
//! below. Values are stored little-endian.

pub const BYTE_SIZE: usize = 1;
pub const BOOLEAN_SIZE: usize = 1;
pub const INT_SIZE: usize = 4;
pub const FLOAT_SIZE: usize = 4;
pub const LONG_SIZE: usize = 8;
pub const DOUBLE_SIZE: usize = 8;

#[inline]
fn read_array<const N: usize>(slot: &[u8], offset: usize) -> [u8; N] {
    let mut raw = [0u8; N];
    raw.copy_from_slice(&slot[offset..offset + N]);
    raw
}

#[inline]
pub fn get_byte(slot: &[u8], offset: usize) -> u8 {
    slot[offset]
}

#[inline]
pub fn put_byte(slot: &mut [u8], offset: usize, value: u8) {
    slot[offset] = value;
}

#[inline]
pub fn get_boolean(slot: &[u8], offset: usize) -> bool {
    slot[offset] != 0
}

#[inline]
pub fn put_boolean(slot: &mut [u8], offset: usize, value: bool) {
    slot[offset] = u8::from(value);
}

#[inline]
pub fn get_int(slot: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes(read_array(slot, offset))
}

#[inline]
pub fn put_int(slot: &mut [u8], offset: usize, value: i32) {
    slot[offset..offset + INT_SIZE].copy_from_slice(&value.to_le_bytes());
}

#[inline]
pub fn get_float(slot: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes(read_array(slot, offset))
}

#[inline]
pub fn put_float(slot: &mut [u8], offset: usize, value: f32) {
    slot[offset..offset + FLOAT_SIZE].copy_from_slice(&value.to_le_bytes());
}

#[inline]
pub fn get_long(slot: &[u8], offset: usize) -> i64 {
    i64::from_le_bytes(read_array(slot, offset))
}

#[inline]
pub fn put_long(slot: &mut [u8], offset: usize, value: i64) {
    slot[offset..offset + LONG_SIZE].copy_from_slice(&value.to_le_bytes());
}

#[inline]
pub fn get_double(slot: &[u8], offset: usize) -> f64 {
    f64::from_le_bytes(read_array(slot, offset))
}

#[inline]
pub fn put_double(slot: &mut [u8], offset: usize, value: f64) {
    slot[offset..offset + DOUBLE_SIZE].copy_from_slice(&value.to_le_bytes());
}
