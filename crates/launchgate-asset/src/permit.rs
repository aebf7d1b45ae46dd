//! Signature-based approvals.
//!
//! An owner signs a [`Permit`] off-line; anyone can submit the resulting
//! [`SignedPermit`] to set the allowance on the owner's behalf. The signed
//! message is a domain-tagged SHA-256 digest binding the permit to one asset
//! address, so a permit for one asset cannot be replayed against another.
//! Replays against the same asset are stopped by the per-owner permit nonce,
//! which the asset checks after the signature.

use chrono::{DateTime, Utc};
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use launchgate_types::{Address, Amount, LaunchgateError, Result, constants};
use sha2::{Digest, Sha256};

/// Fields the owner signs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permit {
    pub owner: Address,
    pub spender: Address,
    pub value: Amount,
    /// Must equal the owner's current permit nonce on the asset.
    pub nonce: u64,
    pub deadline: DateTime<Utc>,
}

impl Permit {
    /// Digest signed by the owner for `asset`.
    #[must_use]
    pub fn digest(&self, asset: Address) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(constants::PERMIT_DOMAIN_TAG);
        hasher.update(asset.as_bytes());
        hasher.update(self.owner.as_bytes());
        hasher.update(self.spender.as_bytes());
        hasher.update(self.value.to_be_bytes());
        hasher.update(self.nonce.to_be_bytes());
        hasher.update(self.deadline.timestamp().to_be_bytes());

        let result = hasher.finalize();
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    /// Sign this permit for `asset` with the owner's key.
    #[must_use]
    pub fn sign(self, asset: Address, key: &SigningKey) -> SignedPermit {
        let signature = key.sign(&self.digest(asset));
        SignedPermit {
            permit: self,
            public_key: key.verifying_key().to_bytes(),
            signature: signature.to_bytes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPermit {
    pub permit: Permit,
    pub public_key: [u8; 32],
    pub signature: [u8; 64],
}

impl SignedPermit {
    /// Check deadline, signer identity and signature. The nonce is checked
    /// by the asset, which owns the counters.
    ///
    /// # Errors
    /// - [`LaunchgateError::PermitExpired`] if `now` is past the deadline.
    /// - [`LaunchgateError::InvalidSignature`] if the key does not control
    ///   `owner` or the signature does not verify.
    pub fn verify(&self, asset: Address, now: DateTime<Utc>) -> Result<()> {
        let permit = &self.permit;
        if now > permit.deadline {
            return Err(LaunchgateError::PermitExpired {
                deadline: permit.deadline,
            });
        }

        let signer = Address::from_public_key(&self.public_key);
        if signer != permit.owner {
            return Err(LaunchgateError::InvalidSignature {
                reason: format!("key controls {signer}, permit owner is {}", permit.owner),
            });
        }

        let key = VerifyingKey::from_bytes(&self.public_key).map_err(|e| {
            LaunchgateError::InvalidSignature {
                reason: format!("bad public key: {e}"),
            }
        })?;
        let signature = Signature::from_bytes(&self.signature);
        key.verify_strict(&permit.digest(asset), &signature)
            .map_err(|e| LaunchgateError::InvalidSignature {
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const ASSET: Address = Address([0xa5; 20]);

    fn key(seed: u8) -> SigningKey {
        SigningKey::from_bytes(&[seed; 32])
    }

    fn permit_for(key: &SigningKey) -> Permit {
        Permit {
            owner: Address::from_public_key(&key.verifying_key().to_bytes()),
            spender: Address([0x5e; 20]),
            value: 1_000,
            nonce: 0,
            deadline: Utc::now() + Duration::hours(1),
        }
    }

    #[test]
    fn valid_permit_verifies() {
        let k = key(1);
        let signed = permit_for(&k).sign(ASSET, &k);
        assert!(signed.verify(ASSET, Utc::now()).is_ok());
    }

    #[test]
    fn expired_permit_is_rejected() {
        let k = key(1);
        let mut permit = permit_for(&k);
        permit.deadline = Utc::now() - Duration::seconds(1);
        let err = permit.sign(ASSET, &k).verify(ASSET, Utc::now()).unwrap_err();
        assert!(matches!(err, LaunchgateError::PermitExpired { .. }));
    }

    #[test]
    fn wrong_signer_is_rejected() {
        let owner = key(1);
        let attacker = key(2);
        let signed = permit_for(&owner).sign(ASSET, &attacker);
        let err = signed.verify(ASSET, Utc::now()).unwrap_err();
        assert!(matches!(err, LaunchgateError::InvalidSignature { .. }));
    }

    #[test]
    fn tampered_value_is_rejected() {
        let k = key(1);
        let mut signed = permit_for(&k).sign(ASSET, &k);
        signed.permit.value += 1;
        let err = signed.verify(ASSET, Utc::now()).unwrap_err();
        assert!(matches!(err, LaunchgateError::InvalidSignature { .. }));
    }

    #[test]
    fn permit_is_bound_to_asset() {
        let k = key(1);
        let signed = permit_for(&k).sign(ASSET, &k);
        assert!(signed.verify(Address([0xa6; 20]), Utc::now()).is_err());
    }

    #[test]
    fn digest_depends_on_every_field() {
        let k = key(1);
        let base = permit_for(&k);
        let d = base.digest(ASSET);
        assert_ne!(d, Permit { nonce: 1, ..base }.digest(ASSET));
        assert_ne!(d, Permit { spender: Address([1; 20]), ..base }.digest(ASSET));
        assert_ne!(
            d,
            Permit {
                deadline: base.deadline + Duration::seconds(1),
                ..base
            }
            .digest(ASSET)
        );
    }
}
