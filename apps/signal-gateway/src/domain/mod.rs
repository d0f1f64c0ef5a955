//! Domain Layer
//!
//! Request-scoped order logic. Nothing in here performs I/O: the validator,
//! the notional arithmetic, the order builder and the signer are all pure and
//! are driven by the application layer.

pub mod credentials;
pub mod notional;
pub mod order;
pub mod order_intent;
pub mod policy;
pub mod signing;
pub mod validation;

pub use credentials::{CredentialConfig, CredentialSource, Credentials};
pub use order::{CanonicalBody, MarketCategory, VenueOrder};
pub use order_intent::{OrderIntent, RawIntent, Side, Symbol};
pub use policy::{BuyQuantityUnit, OrderPolicy, ValidationMode};
pub use signing::{RECV_WINDOW, SignedOrder};
pub use validation::validate_intent;
