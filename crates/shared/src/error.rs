use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("SVC number '{0}' must start with \"SVC\" followed by 3-6 digits")]
    InvalidSvcNumber(String),
}
