//! Service layer: token issuance/verification, the charge-processor client,
//! and the settlement coordinator.

pub mod charge;
pub mod settlement;
pub mod token;

pub use charge::{ChargeClient, ChargeError};
pub use settlement::{SettlementCoordinator, SettlementError};
pub use token::{Claims, TokenError, TokenService};
