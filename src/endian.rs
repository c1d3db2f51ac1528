use byteorder::{ByteOrder, NativeEndian};
use once_cell::sync::Lazy;

// Checked once: store 1 as a 32-bit word and look at the first byte in memory.
static HOST_IS_BIG_ENDIAN: Lazy<bool> = Lazy::new(|| {
    let word = 1u32.to_ne_bytes();
    word[0] != 1
});

/// Returns true when the host stores multi-byte integers most significant byte first.
pub fn host_is_big_endian() -> bool {
    *HOST_IS_BIG_ENDIAN
}

/// Canonical is a fixed-width integer that can be converted to and from the
/// canonical (big-endian) wire layout.
///
/// Both conversions are involutions and leave 8-bit values untouched. On a
/// little-endian host they reverse the bytes of the underlying bit pattern,
/// so signed values keep their two's-complement layout.
pub trait Canonical: Copy {
    /// Width of the value in bytes.
    const WIDTH: usize;

    /// reverse_bytes reverses the in-memory byte order unconditionally.
    fn reverse_bytes(self) -> Self;

    /// write_native stores the value in host byte order into `out[..WIDTH]`.
    fn write_native(self, out: &mut [u8]);

    /// read_native loads a value stored in host byte order from `bytes[..WIDTH]`.
    fn read_native(bytes: &[u8]) -> Self;

    /// to_canonical converts a host value to its canonical representation.
    fn to_canonical(self) -> Self {
        if host_is_big_endian() {
            self
        } else {
            self.reverse_bytes()
        }
    }

    /// from_canonical converts a canonical representation back to a host value.
    fn from_canonical(self) -> Self {
        if host_is_big_endian() {
            self
        } else {
            self.reverse_bytes()
        }
    }
}

impl Canonical for u8 {
    const WIDTH: usize = 1;

    fn reverse_bytes(self) -> Self {
        self
    }

    fn write_native(self, out: &mut [u8]) {
        out[0] = self;
    }

    fn read_native(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl Canonical for i8 {
    const WIDTH: usize = 1;

    fn reverse_bytes(self) -> Self {
        self
    }

    fn write_native(self, out: &mut [u8]) {
        out[0] = self as u8;
    }

    fn read_native(bytes: &[u8]) -> Self {
        bytes[0] as i8
    }
}

macro_rules! impl_canonical {
    ($($t:ty => $write:ident, $read:ident;)*) => {
        $(
            impl Canonical for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();

                fn reverse_bytes(self) -> Self {
                    <$t>::swap_bytes(self)
                }

                fn write_native(self, out: &mut [u8]) {
                    NativeEndian::$write(out, self);
                }

                fn read_native(bytes: &[u8]) -> Self {
                    NativeEndian::$read(bytes)
                }
            }
        )*
    };
}

impl_canonical! {
    u16 => write_u16, read_u16;
    i16 => write_i16, read_i16;
    u32 => write_u32, read_u32;
    i32 => write_i32, read_i32;
    u64 => write_u64, read_u64;
    i64 => write_i64, read_i64;
}

/// to_canonical converts `v` to canonical (big-endian) order.
pub fn to_canonical<T: Canonical>(v: T) -> T {
    v.to_canonical()
}

/// from_canonical converts `v` from canonical (big-endian) order to host order.
pub fn from_canonical<T: Canonical>(v: T) -> T {
    v.from_canonical()
}
