use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use byteorder::{BigEndian, ByteOrder};

use crate::buffer::Buffer;
use crate::compress::{self, BLOCK_SIZE, IV, STATE_WORDS};
use crate::error::Result;

/// Size in bytes of an SM3 digest.
pub const DIGEST_SIZE: usize = 32;

/// Chunk size used when streaming files and readers.
pub const FILE_CHUNK_SIZE: usize = 8192;

const PADDING: [u8; BLOCK_SIZE] = {
    let mut p = [0u8; BLOCK_SIZE];
    p[0] = 0x80;
    p
};

/// Sm3Context is an incremental SM3 computation.
///
/// Bytes are buffered until a whole 64-byte block is available. `finish`
/// consumes the context, so it cannot be updated once the digest is out.
#[derive(Clone)]
pub struct Sm3Context {
    total: [u32; 2],           // bytes absorbed so far (low word, high word)
    state: [u32; STATE_WORDS], // chaining state
    pending: [u8; BLOCK_SIZE], // first total[0] % 64 bytes are valid
}

impl Default for Sm3Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Sm3Context {
    /// new returns a context loaded with the initial state.
    pub fn new() -> Self {
        Sm3Context {
            total: [0, 0],
            state: IV,
            pending: [0; BLOCK_SIZE],
        }
    }

    /// byte_count is the number of bytes absorbed so far.
    pub fn byte_count(&self) -> u64 {
        (u64::from(self.total[1]) << 32) | u64::from(self.total[0])
    }

    /// pending_len is the number of buffered bytes not yet compressed.
    pub fn pending_len(&self) -> usize {
        (self.total[0] as usize) % BLOCK_SIZE
    }

    /// update absorbs `input`. Any split of a message into chunks produces
    /// the same digest as a single call.
    pub fn update(&mut self, mut input: &[u8]) {
        if input.is_empty() {
            return;
        }

        let mut left = self.pending_len();
        let fill = BLOCK_SIZE - left;
        self.add_to_total(input.len() as u64);

        if left > 0 && input.len() >= fill {
            // complete the pending block first
            self.pending[left..].copy_from_slice(&input[..fill]);
            compress::compress(&mut self.state, &self.pending);
            input = &input[fill..];
            left = 0;
        }

        let mut blocks = input.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            compress::compress(&mut self.state, block);
        }

        let rest = blocks.remainder();
        if !rest.is_empty() {
            self.pending[left..left + rest.len()].copy_from_slice(rest);
        }
    }

    fn add_to_total(&mut self, n: u64) {
        let low = u64::from(self.total[0]) + (n & 0xffff_ffff);
        self.total[0] = low as u32;
        self.total[1] = self.total[1]
            .wrapping_add((n >> 32) as u32)
            .wrapping_add((low >> 32) as u32);
    }

    /// finish pads the message, absorbs the bit length and returns the digest.
    pub fn finish(mut self) -> [u8; DIGEST_SIZE] {
        let high = (self.total[0] >> 29) | (self.total[1] << 3);
        let low = self.total[0] << 3;
        let mut msg_len = [0u8; 8];
        BigEndian::write_u32(&mut msg_len[..4], high);
        BigEndian::write_u32(&mut msg_len[4..], low);

        // pad to 56 mod 64 so the length lands in the last 8 bytes of a block
        let last = self.pending_len();
        let padn = if last < 56 { 56 - last } else { 120 - last };
        self.update(&PADDING[..padn]);
        self.update(&msg_len);

        if self.pending_len() != 0 {
            panic!("sm3 padding left {} pending bytes", self.pending_len())
        }

        let mut out = [0u8; DIGEST_SIZE];
        BigEndian::write_u32_into(&self.state, &mut out);
        out
    }

    /// sum appends the digest of everything written so far to `prefix`.
    /// The context itself is left untouched and can keep absorbing input.
    pub fn sum(&self, mut prefix: Buffer) -> Buffer {
        let digest = self.clone().finish();
        prefix.append(&digest);
        prefix
    }
}

impl io::Write for Sm3Context {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// digest returns the SM3 digest of `data` as a 32-byte buffer.
///
/// An empty input returns an empty buffer rather than the standard digest of
/// the empty message. Use [`Sm3Context`] or [`crate::Sm3`] when strict SM3
/// output is required for empty input.
pub fn digest(data: &Buffer) -> Buffer {
    if data.is_empty() {
        return Buffer::new();
    }

    let mut ctx = Sm3Context::new();
    ctx.update(data);
    Buffer::from(&ctx.finish()[..])
}

/// digest_reader streams `reader` to its end in [`FILE_CHUNK_SIZE`] chunks.
pub fn digest_reader<R: Read>(mut reader: R) -> Result<[u8; DIGEST_SIZE]> {
    let mut ctx = Sm3Context::new();
    let mut chunk = vec![0u8; FILE_CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        log::trace!("sm3: absorbing {} bytes", n);
        ctx.update(&chunk[..n]);
    }
    log::trace!("sm3: {} bytes total", ctx.byte_count());

    Ok(ctx.finish())
}

/// digest_file returns the SM3 digest of the file at `path`.
///
/// Unlike [`digest`], an empty file yields the standard digest of the empty
/// message. A path that cannot be opened or read is an error.
pub fn digest_file<P: AsRef<Path>>(path: P) -> Result<Buffer> {
    let path = path.as_ref();
    log::debug!("sm3: hashing file {}", path.display());

    let file = File::open(path)?;
    let out = digest_reader(file)?;

    log::debug!("sm3: {} done", path.display());
    Ok(Buffer::from(&out[..]))
}

#[cfg(test)]
pub mod test {
    use std::io::Write;

    use super::*;
    use anyhow::Result;
    use rand::Rng;
    use sha3::{
        digest::{ExtendableOutput, Update, XofReader},
        Shake256,
    };
    use tempdir::TempDir;

    struct TestElement {
        input: &'static str,
        output: &'static str,
    }

    static TEST_VECTOR: &[TestElement] = &[
        TestElement {
            input: "abc",
            output: "66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0",
        },
        TestElement {
            input: "abcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcd",
            output: "debe9ff92275b8a138604889c18e5a4d6fdb70e5387e5765293dcba39c0c5732",
        },
    ];

    const EMPTY_DIGEST: &str = "1ab21d8355cfa17f8e61194831e81a8f22bec8c728fefb747ed035eb5082aa2b";

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn shake_input(seed: &str, len: usize) -> Vec<u8> {
        let mut input = vec![0; len];
        let mut v = Shake256::default();
        v.update(seed.as_bytes());
        XofReader::read(&mut v.finalize_xof(), &mut input);
        input
    }

    #[test]
    fn test_vector() {
        TEST_VECTOR.iter().enumerate().for_each(|(i, element)| {
            let mut ctx = Sm3Context::new();
            ctx.update(element.input.as_bytes());
            let sum = hex::encode(ctx.finish());
            assert_eq!(
                element.output, sum,
                "test vector element mismatched on index {} failed! got {}, want {}",
                i, sum, element.output
            );

            let b = digest(&Buffer::from(element.input));
            assert_eq!(b.len(), DIGEST_SIZE);
            assert_eq!(b.to_hex(), element.output.to_uppercase());
        })
    }

    #[test]
    fn empty_input() {
        assert!(digest(&Buffer::new()).is_empty());
        assert_eq!(hex::encode(Sm3Context::new().finish()), EMPTY_DIGEST);
    }

    #[test]
    fn padding_boundaries() {
        // lengths around the 56-byte cutoff and block edges must all agree
        // between one-shot and byte-at-a-time absorption
        for len in [55usize, 56, 57, 63, 64, 65, 119, 120, 128] {
            let input = shake_input("sm3 padding", len);

            let mut whole = Sm3Context::new();
            whole.update(&input);

            let mut bytewise = Sm3Context::new();
            input.iter().for_each(|b| bytewise.update(&[*b]));

            assert_eq!(whole.byte_count(), len as u64);
            assert_eq!(whole.pending_len(), len % BLOCK_SIZE);
            assert_eq!(whole.finish(), bytewise.finish(), "length {}", len);
        }
    }

    #[test]
    fn random_partitions() {
        let input = shake_input("sm3 input", 6000);
        let mut expected = Sm3Context::new();
        expected.update(&input);
        let expected = expected.finish();

        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let mut ctx = Sm3Context::new();
            let mut rest = &input[..];
            while !rest.is_empty() {
                let n = rng.gen_range(0..=rest.len().min(200));
                ctx.update(&rest[..n]);
                rest = &rest[n..];
            }
            assert_eq!(ctx.finish(), expected);
        }
    }

    #[test]
    fn counter_carries_into_high_word() {
        let mut ctx = Sm3Context::new();
        ctx.total = [u32::MAX - 9, 0];
        ctx.add_to_total(20);
        assert_eq!(ctx.total, [10, 1]);
        assert_eq!(ctx.byte_count(), (1u64 << 32) + 10);

        ctx.add_to_total(3 << 32);
        assert_eq!(ctx.total, [10, 4]);
    }

    #[test]
    fn sum_keeps_context_usable() -> Result<()> {
        let mut ctx = Sm3Context::new();
        ctx.write_all(b"ab")?;

        let prefix = Buffer::from("prefix");
        let partial = ctx.sum(prefix.clone());
        assert_eq!(partial.mid(0, Some(6))?, prefix);
        assert_eq!(partial.len(), 6 + DIGEST_SIZE);

        ctx.write_all(b"c")?;
        assert_eq!(ctx.sum(Buffer::new()).to_hex(), TEST_VECTOR[0].output.to_uppercase());
        Ok(())
    }

    #[test]
    fn file_digest() -> Result<()> {
        init();
        let dir = TempDir::new("sm3kit")?;

        let path = dir.path().join("abc.bin");
        File::create(&path)?.write_all(b"abc")?;
        assert_eq!(
            hex::encode(&*digest_file(&path)?),
            TEST_VECTOR[0].output
        );

        // spans several read chunks
        let input = shake_input("sm3 file", FILE_CHUNK_SIZE * 3 + 17);
        let path = dir.path().join("big.bin");
        File::create(&path)?.write_all(&input)?;
        let mut ctx = Sm3Context::new();
        ctx.update(&input);
        assert_eq!(&*digest_file(&path)?, &ctx.finish()[..]);

        let path = dir.path().join("empty.bin");
        File::create(&path)?;
        assert_eq!(hex::encode(&*digest_file(&path)?), EMPTY_DIGEST);

        assert!(matches!(
            digest_file(dir.path().join("missing.bin")),
            Err(crate::Error::Io(_))
        ));
        Ok(())
    }

    #[test]
    fn reader_digest() -> Result<()> {
        let out = digest_reader(&b"abc"[..])?;
        assert_eq!(hex::encode(out), TEST_VECTOR[0].output);
        Ok(())
    }
}
