use thiserror::Error;

#[derive(Error, Debug)]
pub enum DesignerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Can't insert unknown annotation! ({0})")]
    UnknownAnnotationKind(String),

    #[error("Gesture carries no annotation type")]
    MissingAnnotationType,

    #[error("No active viewer session")]
    NoActiveSession,

    #[error("Invalid document reference: {0}")]
    InvalidDocument(String),

    #[error("Failed to load {document}: {reason}")]
    LoadFailed { document: String, reason: String },

    #[error("Container already has a mounted viewer: {0}")]
    ContainerInUse(String),

    #[error("Creation rejected: {0}")]
    CreationRejected(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl DesignerError {
    /// Whether the error came from an annotation kind token that is not in the catalog
    pub fn is_unknown_kind(&self) -> bool {
        matches!(self, DesignerError::UnknownAnnotationKind(_))
    }
}

pub type Result<T> = std::result::Result<T, DesignerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_display() {
        let error = DesignerError::UnknownAnnotationKind("bogus-kind".to_string());
        assert_eq!(
            error.to_string(),
            "Can't insert unknown annotation! (bogus-kind)"
        );
        assert!(error.is_unknown_kind());
    }

    #[test]
    fn test_load_failed_display() {
        let error = DesignerError::LoadFailed {
            document: "lease.pdf".to_string(),
            reason: "network unreachable".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to load lease.pdf: network unreachable"
        );
        assert!(!error.is_unknown_kind());
    }

    #[test]
    fn test_config_error_from_serde() {
        let serde_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error = DesignerError::from(serde_error);

        match error {
            DesignerError::Config(_) => {}
            _ => panic!("Expected Config variant"),
        }
    }

    #[test]
    fn test_all_variants_display() {
        let errors = vec![
            DesignerError::UnknownAnnotationKind("x".to_string()),
            DesignerError::MissingAnnotationType,
            DesignerError::NoActiveSession,
            DesignerError::InvalidDocument("".to_string()),
            DesignerError::ContainerInUse("viewer".to_string()),
            DesignerError::CreationRejected("duplicate id".to_string()),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DesignerError>();
    }
}
