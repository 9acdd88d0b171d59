//! Perimeter DNS - Record retrieval and per-subdomain address resolution.
//!
//! Wraps a `hickory-resolver` `TokioAsyncResolver` behind the [`DnsLookup`]
//! seam. Every query is bounded by a configured timeout; "no records" is a
//! normal outcome (empty set / absent address), never a scan failure.

pub mod error;
pub mod resolver;

pub use error::{DnsError, Result};
pub use resolver::{
    DnsClient, DnsLookup, DnsRecordSet, MxRecord, NsRecord, ResolvedAddress,
};
