// ── Domain model ──

pub mod client;

pub use client::{Client, ClientForm, ClientId, ClientPatch, ClientStatus, NewClient, none_if_empty};
