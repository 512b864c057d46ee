//! Transaction records as read from input files.

use crate::types::Amount;

/// One transaction request as it appears in an input file.
///
/// Optional fields that the file leaves empty are `None` and are filled in
/// by [`resolve_transactions`](crate::transaction::resolve_transactions). A
/// present zero is `Some("0")` and is kept as given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Destination address in chain hex form.
    pub to: String,
    /// Source address in chain hex form.
    pub from: String,
    /// Amount in whole coins.
    pub amount: Amount,
    /// Energy limit as a decimal string.
    pub energy_limit: Option<String>,
    /// Energy price as a decimal string.
    pub energy_price: Option<String>,
    /// Nonce as a decimal string.
    pub nonce: Option<String>,
}

impl TransactionRecord {
    /// Creates a record with every optional field absent.
    pub fn new(to: impl Into<String>, from: impl Into<String>, amount: Amount) -> Self {
        Self {
            to: to.into(),
            from: from.into(),
            amount,
            energy_limit: None,
            energy_price: None,
            nonce: None,
        }
    }

    /// Sets the energy limit.
    #[must_use]
    pub fn with_energy_limit(mut self, energy_limit: impl Into<String>) -> Self {
        self.energy_limit = Some(energy_limit.into());
        self
    }

    /// Sets the energy price.
    #[must_use]
    pub fn with_energy_price(mut self, energy_price: impl Into<String>) -> Self {
        self.energy_price = Some(energy_price.into());
        self
    }

    /// Sets the nonce.
    #[must_use]
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Returns true if no remote lookup is needed to resolve this record.
    pub fn is_complete(&self) -> bool {
        self.energy_limit.is_some() && self.energy_price.is_some() && self.nonce.is_some()
    }
}

/// A record with every field populated, ready to be signed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTransaction {
    /// Destination address in chain hex form.
    pub to: String,
    /// Source address in chain hex form.
    pub from: String,
    /// Amount in whole coins.
    pub amount: Amount,
    /// Energy limit as a decimal string.
    pub energy_limit: String,
    /// Energy price as a decimal string.
    pub energy_price: String,
    /// Nonce as a decimal string.
    pub nonce: String,
}
