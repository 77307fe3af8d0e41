//! gRPC surface: `library.v1.LibraryService`
//!
//! Service and client stubs are generated by `build.rs`; the messages live in
//! [`messages`].

pub mod messages;
mod service;

pub use service::LibraryRpc;

#[allow(clippy::all)]
mod generated {
    include!(concat!(env!("OUT_DIR"), "/library.v1.LibraryService.rs"));
}

pub use generated::{library_service_client, library_service_server};
