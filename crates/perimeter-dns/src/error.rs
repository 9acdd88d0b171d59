use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DnsError {
    /// NXDOMAIN / no-answer: a normal outcome for callers, kept distinct so
    /// it can be logged at a lower level than real resolver faults.
    #[error("no records for {name}")]
    NoRecords { name: String },

    #[error("resolution failed for {name}: {source}")]
    Resolution {
        name: String,
        #[source]
        source: ResolveError,
    },
}

impl DnsError {
    pub fn from_resolve(name: &str, err: ResolveError) -> Self {
        if matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. }) {
            Self::NoRecords {
                name: name.to_string(),
            }
        } else {
            Self::Resolution {
                name: name.to_string(),
                source: err,
            }
        }
    }

    pub fn is_no_records(&self) -> bool {
        matches!(self, Self::NoRecords { .. })
    }
}

pub type Result<T> = std::result::Result<T, DnsError>;
