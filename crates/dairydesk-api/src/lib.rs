// dairydesk-api: Async Rust client for the DairyDesk managed backend
// (Firestore document REST API + Identity Toolkit REST API).

pub mod error;
pub mod firestore;
pub mod identity;
pub mod transport;

pub use error::Error;
pub use firestore::FirestoreClient;
pub use identity::IdentityClient;
pub use transport::{TokenCache, TransportConfig};
