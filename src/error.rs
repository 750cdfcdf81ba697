use crate::models::Id;

/// Failures produced while building, delivering, or proxying a report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An upstream collection fetch failed (transport, status, timeout, or decode).
    #[error("{name} source unavailable: {reason}")]
    SourceUnavailable { name: &'static str, reason: String },

    /// A holding references a company id missing from the companies source.
    #[error("company {0} not found in companies source")]
    CompanyNotFound(Id),

    #[error("value for user {user_id} holding {company_id} overflows")]
    ValueOverflow { user_id: Id, company_id: Id },

    #[error("failed to render CSV: {0}")]
    Render(String),

    /// Logged only; never surfaced to the report caller.
    #[error("export forwarding failed: {0}")]
    ExportForwardingFailed(String),

    #[error("investment lookup failed: {0}")]
    ProxyUpstreamFailed(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn source_unavailable(name: &'static str, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            name,
            reason: reason.to_string(),
        }
    }

    /// Name of the upstream source that failed, if this is a source failure.
    pub fn failed_source(&self) -> Option<&'static str> {
        match self {
            Self::SourceUnavailable { name, .. } => Some(*name),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
