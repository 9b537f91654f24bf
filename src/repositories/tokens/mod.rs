//! 토큰 폐기 기록 계층

pub mod revocation_ledger;
pub mod memory;

pub use revocation_ledger::*;
pub use memory::InMemoryRevocationLedger;
