use thiserror::Error;

/// Boxed driver failure carried as the source of installer errors.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Installer step that was running when the database failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Locking,
    Checking,
    Executing,
    Verifying,
    Unlocking,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Locking => write!(f, "acquiring lock for"),
            Self::Checking => write!(f, "checking existing"),
            Self::Executing => write!(f, "executing SQL for"),
            Self::Verifying => write!(f, "verifying"),
            Self::Unlocking => write!(f, "releasing lock for"),
        }
    }
}

/// A catalog query failed outright, as opposed to reporting a routine absent.
#[derive(Debug, Error)]
#[error("error checking existence of function {routine}")]
pub struct ProbeError {
    pub routine: String,
    #[source]
    pub source: Cause,
}

/// Error types for installing a group of routines.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("error {phase} {group} functions")]
    Database {
        group: &'static str,
        phase: Phase,
        #[source]
        source: Cause,
    },

    #[error("not all required SQL {group} functions were created")]
    Incomplete { group: &'static str },

    #[error("unknown function group '{0}'")]
    UnknownGroup(String),
}

impl InstallError {
    pub(crate) fn database<E>(group: &'static str, phase: Phase, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Database {
            group,
            phase,
            source: Box::new(source),
        }
    }

    /// The step that failed, when the failure came from the database.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::Database { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}
