//! Transaction records, field resolution, and signing.
//!
//! - [`TransactionRecord`] / [`ResolvedTransaction`] - records as loaded and
//!   after missing fields are filled in
//! - [`resolve_transactions`] - fills in nonce, energy price, and energy limit
//! - [`sign_transactions`] - turns resolved records into wire blobs
//! - [`UnsignedTransaction`] / [`SignedTransaction`] - typed transactions
//! - [`BatchOutcome`] - partial-success result shared by batch stages

pub mod batch;
pub mod record;
pub mod resolver;
pub mod signer;
pub mod types;

pub use batch::BatchOutcome;
pub use record::{ResolvedTransaction, TransactionRecord};
pub use resolver::resolve_transactions;
pub use signer::{sign_transaction, sign_transactions};
pub use types::{SignedTransaction, UnsignedTransaction};
