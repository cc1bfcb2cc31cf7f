//! Integration tests for the student records service.
//!
//! `api` runs against the in-memory store. `mongo` needs a MongoDB server:
//! run with `cargo test --test integration -- --ignored` and set MONGODB_URI
//! if it is not on localhost.

mod api;
mod mongo;
