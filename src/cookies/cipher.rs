//! Symmetric cipher engine for cookie payloads.
//!
//! Wraps BoringSSL's `EVP` ciphers behind a small `(algorithm, mode)` pair so
//! deployments can move off the legacy default without touching the codec.
//!
//! ## Key and IV handling
//! - Material longer than the cipher needs is truncated.
//! - Shorter material is right-padded with zero bytes.
//! - Modes without an IV (ECB) ignore the IV argument.
//!
//! Block modes (ECB, CBC) use PKCS7 padding; stream modes (CTR, OFB) do not pad.

use crate::base::error::CodecError;
use boring::symm::{Cipher, Crypter, Mode};
use serde::{Deserialize, Serialize};

/// Block cipher family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherAlgorithm {
    Aes128,
    #[default]
    Aes256,
}

/// Block cipher mode of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherMode {
    Ecb,
    #[default]
    Cbc,
    Ctr,
    Ofb,
}

impl CipherMode {
    /// Whether the mode operates on whole blocks and needs padding.
    pub fn is_block_mode(self) -> bool {
        matches!(self, CipherMode::Ecb | CipherMode::Cbc)
    }
}

impl CipherAlgorithm {
    /// Resolve the BoringSSL cipher for this algorithm and mode.
    pub fn cipher(self, mode: CipherMode) -> Cipher {
        match (self, mode) {
            (CipherAlgorithm::Aes128, CipherMode::Ecb) => Cipher::aes_128_ecb(),
            (CipherAlgorithm::Aes128, CipherMode::Cbc) => Cipher::aes_128_cbc(),
            (CipherAlgorithm::Aes128, CipherMode::Ctr) => Cipher::aes_128_ctr(),
            (CipherAlgorithm::Aes128, CipherMode::Ofb) => Cipher::aes_128_ofb(),
            (CipherAlgorithm::Aes256, CipherMode::Ecb) => Cipher::aes_256_ecb(),
            (CipherAlgorithm::Aes256, CipherMode::Cbc) => Cipher::aes_256_cbc(),
            (CipherAlgorithm::Aes256, CipherMode::Ctr) => Cipher::aes_256_ctr(),
            (CipherAlgorithm::Aes256, CipherMode::Ofb) => Cipher::aes_256_ofb(),
        }
    }
}

/// Encrypts and decrypts raw bytes with a configured cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CipherEngine {
    algorithm: CipherAlgorithm,
    mode: CipherMode,
}

impl CipherEngine {
    pub fn new(algorithm: CipherAlgorithm, mode: CipherMode) -> Self {
        Self { algorithm, mode }
    }

    pub fn algorithm(&self) -> CipherAlgorithm {
        self.algorithm
    }

    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    /// Key length in bytes required by the cipher.
    pub fn key_len(&self) -> usize {
        self.cipher().key_len()
    }

    /// IV length in bytes, or `None` when the mode takes no IV.
    pub fn iv_len(&self) -> Option<usize> {
        self.cipher().iv_len()
    }

    /// Encrypt `plaintext`. Empty input yields empty output.
    pub fn encrypt(&self, plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, CodecError> {
        if plaintext.is_empty() {
            return Ok(Vec::new());
        }
        self.run(Mode::Encrypt, plaintext, key, iv)
    }

    /// Decrypt `ciphertext`. Empty input yields empty output.
    pub fn decrypt(&self, ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, CodecError> {
        if ciphertext.is_empty() {
            return Ok(Vec::new());
        }

        let block_size = self.cipher().block_size();
        if self.mode.is_block_mode() && ciphertext.len() % block_size != 0 {
            return Err(CodecError::InvalidCiphertextLength {
                len: ciphertext.len(),
                block_size,
            });
        }

        self.run(Mode::Decrypt, ciphertext, key, iv)
    }

    fn cipher(&self) -> Cipher {
        self.algorithm.cipher(self.mode)
    }

    fn run(&self, direction: Mode, data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, CodecError> {
        let cipher = self.cipher();
        let key = normalize(key, cipher.key_len());
        let iv = cipher.iv_len().map(|len| normalize(iv, len));

        let mut crypter = Crypter::new(cipher, direction, &key, iv.as_deref())?;
        crypter.pad(self.mode.is_block_mode());

        let mut out = vec![0u8; data.len() + cipher.block_size()];
        let count = crypter.update(data, &mut out)?;
        let rest = crypter.finalize(&mut out[count..])?;
        out.truncate(count + rest);

        Ok(out)
    }
}

/// Fit key or IV material to exactly `len` bytes.
///
/// Longer input is truncated, shorter input is right-padded with `0x00`.
pub fn normalize(material: &[u8], len: usize) -> Vec<u8> {
    let mut fitted = material[..material.len().min(len)].to_vec();
    fitted.resize(len, 0);
    fitted
}
