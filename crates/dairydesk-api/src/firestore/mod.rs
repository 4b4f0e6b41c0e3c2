// Firestore document API
//
// Wire types and a thin async client for the subset of the Firestore REST
// surface the console needs: document CRUD on a collection plus structured
// queries with order-by and equality filters.

pub mod client;
pub mod documents;
pub mod types;

pub use client::FirestoreClient;
pub use documents::QuerySpec;
pub use types::{Document, Value};
