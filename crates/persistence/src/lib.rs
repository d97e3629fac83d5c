//! Campus Finders Persistence - In-memory caching of server snapshots

pub mod cache;

pub use cache::CandidateCache;
