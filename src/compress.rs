use byteorder::{BigEndian, ByteOrder};

/// Block size, in bytes, consumed by one compression.
pub const BLOCK_SIZE: usize = 64;

/// Number of 32-bit words in the chaining state.
pub const STATE_WORDS: usize = 8;

/// Initial chaining value.
pub const IV: [u32; STATE_WORDS] = [
    0x7380166f, 0x4914b2b9, 0x172442d7, 0xda8a0600, 0xa96f30bc, 0x163138aa, 0xe38dee4d, 0xb0fb0e4e,
];

// Round constants for rounds 0..16 and 16..64.
const T_0: u32 = 0x79cc4519;
const T_1: u32 = 0x7a879d8a;

#[inline(always)]
fn ff0(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

#[inline(always)]
fn ff1(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (x & z) | (y & z)
}

#[inline(always)]
fn gg0(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

#[inline(always)]
fn gg1(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

#[inline(always)]
fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

#[inline(always)]
fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

/// expand builds the 68-word schedule W and the 64-word schedule W' from one
/// block.
fn expand(block: &[u8]) -> ([u32; 68], [u32; 64]) {
    let mut w = [0u32; 68];
    let mut w1 = [0u32; 64];

    BigEndian::read_u32_into(block, &mut w[..16]);
    for j in 16..68 {
        w[j] = p1(w[j - 16] ^ w[j - 9] ^ w[j - 3].rotate_left(15))
            ^ w[j - 13].rotate_left(7)
            ^ w[j - 6];
    }
    for j in 0..64 {
        w1[j] = w[j] ^ w[j + 4];
    }

    (w, w1)
}

/// compress absorbs one 64-byte block into `state`.
///
/// Panics if `block` is not exactly [`BLOCK_SIZE`] bytes long.
pub fn compress(state: &mut [u32; STATE_WORDS], block: &[u8]) {
    assert_eq!(block.len(), BLOCK_SIZE, "sm3 block must be 64 bytes");

    let (w, w1) = expand(block);
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for j in 0..64 {
        // rotate_left takes the amount mod 32, matching T_j <<< (j mod 32)
        let t = if j < 16 { T_0 } else { T_1 };
        let a12 = a.rotate_left(12);
        let ss1 = a12
            .wrapping_add(e)
            .wrapping_add(t.rotate_left(j as u32))
            .rotate_left(7);
        let ss2 = ss1 ^ a12;

        let (ff, gg) = if j < 16 {
            (ff0(a, b, c), gg0(e, f, g))
        } else {
            (ff1(a, b, c), gg1(e, f, g))
        };
        let tt1 = ff.wrapping_add(d).wrapping_add(ss2).wrapping_add(w1[j]);
        let tt2 = gg.wrapping_add(h).wrapping_add(ss1).wrapping_add(w[j]);

        d = c;
        c = b.rotate_left(9);
        b = a;
        a = tt1;
        h = g;
        g = f.rotate_left(19);
        f = e;
        e = p0(tt2);
    }

    for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *s ^= v;
    }
}
