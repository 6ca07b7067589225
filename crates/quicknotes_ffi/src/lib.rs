//! Host-UI bridge for QuickNotes.
//! Exposes sync note use-cases to a Flutter shell via flutter_rust_bridge.

pub mod api;
