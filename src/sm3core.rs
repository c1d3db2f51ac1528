use core::fmt;

use byteorder::{BigEndian, ByteOrder};
use digest::{
    block_buffer::Eager,
    core_api::{
        AlgorithmName, Buffer, BufferKindUser, CoreWrapper, FixedOutputCore, OutputSizeUser,
        UpdateCore,
    },
    crypto_common::{Block, BlockSizeUser},
    typenum::{U32, U64},
    HashMarker, Output, Reset,
};

use crate::compress::{compress, BLOCK_SIZE, IV, STATE_WORDS};

/// Sm3 is the SM3 hasher with the standard [`digest::Digest`] interface.
pub type Sm3 = CoreWrapper<Sm3Core>;

/// Sm3Core is the block-level core behind [`Sm3`]. Block buffering and
/// padding are left to the `digest` wrapper.
#[derive(Clone)]
pub struct Sm3Core {
    state: [u32; STATE_WORDS],
    block_len: u64, // full blocks compressed so far
}

impl Default for Sm3Core {
    fn default() -> Self {
        Self {
            state: IV,
            block_len: 0,
        }
    }
}

impl Reset for Sm3Core {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl HashMarker for Sm3Core {}

impl BlockSizeUser for Sm3Core {
    type BlockSize = U64;
}

impl BufferKindUser for Sm3Core {
    type BufferKind = Eager;
}

impl OutputSizeUser for Sm3Core {
    type OutputSize = U32;
}

impl UpdateCore for Sm3Core {
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        self.block_len = self.block_len.wrapping_add(blocks.len() as u64);
        for b in blocks {
            compress(&mut self.state, b);
        }
    }
}

impl FixedOutputCore for Sm3Core {
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        let byte_len = self.block_len * BLOCK_SIZE as u64 + buffer.get_pos() as u64;
        let bit_len = byte_len << 3; // number of input bits written
        let state = &mut self.state;
        buffer.len64_padding_be(bit_len, |b| compress(state, b));

        BigEndian::write_u32_into(&self.state, out);
    }
}

impl AlgorithmName for Sm3Core {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sm3")
    }
}

impl fmt::Debug for Sm3Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sm3Core { ... }")
    }
}

#[cfg(test)]
pub mod test {
    use std::io::Write;

    use super::*;
    use crate::sm3::Sm3Context;
    use digest::{Digest, FixedOutput, Update};
    use sha3::{
        digest::{ExtendableOutput, XofReader},
        Shake256,
    };

    struct TestElement {
        input: &'static str,
        output: &'static str,
    }

    static TEST_VECTOR: &[TestElement] = &[
        TestElement {
            input: "",
            output: "1ab21d8355cfa17f8e61194831e81a8f22bec8c728fefb747ed035eb5082aa2b",
        },
        TestElement {
            input: "abc",
            output: "66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0",
        },
        TestElement {
            input: "abcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcd",
            output: "debe9ff92275b8a138604889c18e5a4d6fdb70e5387e5765293dcba39c0c5732",
        },
    ];

    #[test]
    fn test_vector() {
        TEST_VECTOR.iter().enumerate().for_each(|(i, element)| {
            let mut h = Sm3::default();

            Update::update(&mut h, element.input.as_bytes());

            let sum = hex::encode(h.finalize_fixed());
            assert_eq!(
                element.output, sum,
                "test vector element mismatched on index {} failed! got {}, want {}",
                i, sum, element.output
            );
        })
    }

    #[test]
    fn matches_streaming_context() {
        let mut input = [0; 6000];
        let mut v = Shake256::default();
        v.write_all("sm3 input".as_bytes()).unwrap();
        XofReader::read(&mut v.finalize_xof(), &mut input);

        let mut ctx = Sm3Context::new();
        ctx.update(&input);
        let expected = ctx.finish();

        for chunk in [1usize, 7, 63, 64, 65, 1000, 6000] {
            let mut h = Sm3::new();
            input.chunks(chunk).for_each(|c| Digest::update(&mut h, c));
            assert_eq!(h.finalize().as_slice(), &expected[..], "chunk size {}", chunk);
        }
    }

    #[test]
    fn sm3_reset() {
        let mut h = Sm3::new();
        h.write_all(b"some unrelated prefix").unwrap();
        Digest::reset(&mut h);
        Digest::update(&mut h, b"abc");

        let sum = hex::encode(h.finalize());
        assert_eq!(sum, TEST_VECTOR[1].output);
    }

    #[test]
    fn one_shot() {
        let sum = hex::encode(Sm3::digest(b"abc"));
        assert_eq!(sum, TEST_VECTOR[1].output);
    }
}
