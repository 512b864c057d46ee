//! Typed transactions.

use crate::crypto::sha3_256;
use crate::error::SigningError;
use crate::types::{Address, NetworkId};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// The unsigned transaction that a client signs.
///
/// Energy price and amount are arbitrary precision because both are
/// denominated in the smallest unit and routinely exceed `u64`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    /// Sequence number of this transaction for its sender.
    pub nonce: u64,
    /// Price per energy unit in the smallest unit.
    #[serde(with = "biguint_bytes")]
    pub energy_price: BigUint,
    /// Maximum energy units the sender is willing to pay.
    pub energy_limit: u64,
    /// Recipient address.
    pub to: Address,
    /// Transferred value in the smallest unit.
    #[serde(with = "biguint_bytes")]
    pub amount: BigUint,
    /// Call data. Empty for plain transfers.
    pub payload: Vec<u8>,
}

impl UnsignedTransaction {
    /// Creates a plain value transfer with an empty payload.
    pub fn transfer(
        nonce: u64,
        energy_price: BigUint,
        energy_limit: u64,
        to: Address,
        amount: BigUint,
    ) -> Self {
        Self {
            nonce,
            energy_price,
            energy_limit,
            to,
            amount,
            payload: Vec::new(),
        }
    }

    /// Generates the message that is signed for this transaction.
    ///
    /// The network identifier is part of the message, so a signature made
    /// for one network does not verify on another.
    ///
    /// # Errors
    ///
    /// Returns an error if BCS serialization of the transaction fails.
    pub fn signing_message(&self, network: NetworkId) -> Result<Vec<u8>, SigningError> {
        let prefix = sha3_256(b"PIGEON::UnsignedTransaction");
        let bcs_bytes = bcs::to_bytes(&(network.id(), self)).map_err(SigningError::encoding)?;

        let mut message = Vec::with_capacity(prefix.len() + bcs_bytes.len());
        message.extend_from_slice(&prefix);
        message.extend_from_slice(&bcs_bytes);
        Ok(message)
    }
}

/// A signed transaction, ready to be canonicalized and broadcast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    raw: UnsignedTransaction,
    network: NetworkId,
    public_key: Vec<u8>,
    signature: Vec<u8>,
}

impl SignedTransaction {
    /// Creates a new signed transaction.
    pub fn new(
        raw: UnsignedTransaction,
        network: NetworkId,
        public_key: Vec<u8>,
        signature: Vec<u8>,
    ) -> Self {
        Self {
            raw,
            network,
            public_key,
            signature,
        }
    }

    /// Returns the unsigned transaction.
    pub fn raw(&self) -> &UnsignedTransaction {
        &self.raw
    }

    /// Returns the network the signature is bound to.
    pub fn network(&self) -> NetworkId {
        self.network
    }

    /// Returns the signer's public key.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Returns the signature bytes.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Serializes this signed transaction to BCS bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if BCS serialization fails.
    pub fn to_bcs(&self) -> Result<Vec<u8>, SigningError> {
        bcs::to_bytes(self).map_err(SigningError::encoding)
    }

    /// Decodes a signed transaction from BCS bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid encoding.
    pub fn from_bcs(bytes: &[u8]) -> Result<Self, SigningError> {
        bcs::from_bytes(bytes).map_err(SigningError::encoding)
    }

    /// Returns the wire blob: `0x` followed by the hex of the BCS bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if BCS serialization fails.
    pub fn to_hex(&self) -> Result<String, SigningError> {
        Ok(format!("0x{}", hex::encode(self.to_bcs()?)))
    }

    /// Computes the transaction hash, the SHA3-256 of the BCS bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if BCS serialization fails.
    pub fn hash(&self) -> Result<[u8; 32], SigningError> {
        Ok(sha3_256(&self.to_bcs()?))
    }

    /// Returns the transaction hash as `0x`-prefixed hex.
    ///
    /// # Errors
    ///
    /// Returns an error if BCS serialization fails.
    pub fn hash_hex(&self) -> Result<String, SigningError> {
        Ok(format!("0x{}", hex::encode(self.hash()?)))
    }
}

/// Serializes a `BigUint` as its big-endian byte string.
mod biguint_bytes {
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        value: &BigUint,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&value.to_bytes_be())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BigUint, D::Error> {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        Ok(BigUint::from_bytes_be(&bytes))
    }
}
