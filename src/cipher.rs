use crate::buffer::Buffer;
use crate::error::Result;

/// BlockCipher is the contract for a symmetric cipher operating on
/// [`Buffer`]s. No algorithm ships with this crate; implementations are
/// supplied by the caller.
///
/// On success `output` holds exactly the produced bytes. Implementations
/// report failures through [`crate::Error`], typically wrapping their own
/// error in [`crate::Error::Other`].
pub trait BlockCipher {
    /// encrypt enciphers `data` under `key` into `output`.
    fn encrypt(&self, data: &[u8], key: &Buffer, output: &mut Buffer) -> Result<()>;

    /// decrypt reverses [`BlockCipher::encrypt`].
    fn decrypt(&self, data: &[u8], key: &Buffer, output: &mut Buffer) -> Result<()>;

    /// encrypt_buffer is [`BlockCipher::encrypt`] over a buffer.
    fn encrypt_buffer(&self, data: &Buffer, key: &Buffer, output: &mut Buffer) -> Result<()> {
        self.encrypt(data, key, output)
    }

    /// decrypt_buffer is [`BlockCipher::decrypt`] over a buffer.
    fn decrypt_buffer(&self, data: &Buffer, key: &Buffer, output: &mut Buffer) -> Result<()> {
        self.decrypt(data, key, output)
    }
}
