//! Cross-domain transfer payload.
//!
//! Wire layout, two 32-byte words:
//! ```text
//! [0..12)   zero padding
//! [12..32)  recipient address
//! [32..48)  zero padding (amount high bits)
//! [48..64)  amount, big-endian
//! ```

use launchgate_types::{Address, Amount, LaunchgateError, Result, constants};

const WORD: usize = 32;
const ADDRESS_PAD: usize = WORD - 20;
const AMOUNT_PAD: usize = WORD - 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferPayload {
    pub recipient: Address,
    pub amount: Amount,
}

impl TransferPayload {
    #[must_use]
    pub fn new(recipient: Address, amount: Amount) -> Self {
        Self { recipient, amount }
    }

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![0u8; constants::TRANSFER_PAYLOAD_LEN];
        out[ADDRESS_PAD..WORD].copy_from_slice(self.recipient.as_bytes());
        out[WORD + AMOUNT_PAD..].copy_from_slice(&self.amount.to_be_bytes());
        out
    }

    /// # Errors
    /// Returns [`LaunchgateError::MalformedPayload`] on a wrong length or
    /// non-zero padding.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != constants::TRANSFER_PAYLOAD_LEN {
            return Err(LaunchgateError::MalformedPayload {
                reason: format!(
                    "expected {} bytes, got {}",
                    constants::TRANSFER_PAYLOAD_LEN,
                    bytes.len()
                ),
            });
        }
        if bytes[..ADDRESS_PAD].iter().any(|&b| b != 0) {
            return Err(LaunchgateError::MalformedPayload {
                reason: format!(
                    "recipient word has non-zero padding: 0x{}",
                    hex::encode(&bytes[..WORD])
                ),
            });
        }
        if bytes[WORD..WORD + AMOUNT_PAD].iter().any(|&b| b != 0) {
            return Err(LaunchgateError::MalformedPayload {
                reason: "amount exceeds 128 bits".into(),
            });
        }

        let mut recipient = [0u8; 20];
        recipient.copy_from_slice(&bytes[ADDRESS_PAD..WORD]);
        let mut amount = [0u8; 16];
        amount.copy_from_slice(&bytes[WORD + AMOUNT_PAD..]);
        Ok(Self {
            recipient: Address::new(recipient),
            amount: Amount::from_be_bytes(amount),
        })
    }
}
