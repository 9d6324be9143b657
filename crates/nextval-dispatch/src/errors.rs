use thiserror::Error;

use nextval_core::BoxError;

/// Failures recorded while dispatching generators for one create operation.
///
/// Skip sentinels are filtered out before this layer; every variant here is
/// reportable. Failures never stop processing of the remaining fields or
/// entities in the operation.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A field carries the generator tag key but no generator is registered
    /// for the tag's value.
    #[error("unregistered tag {tag}")]
    UnregisteredTag { tag: String },
    /// A registered generator returned an error other than the skip sentinel.
    #[error("invoke generator {tag}: {source}")]
    Invoke {
        tag: String,
        #[source]
        source: BoxError,
    },
}

impl DispatchError {
    /// Tag the failure was recorded against.
    pub fn tag(&self) -> &str {
        match self {
            DispatchError::UnregisteredTag { tag } | DispatchError::Invoke { tag, .. } => tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn invoke_errors_unwrap_to_the_original_cause() {
        let cause: BoxError = "generate next value fail".to_string().into();
        let err = DispatchError::Invoke {
            tag: "snowflake".to_string(),
            source: cause,
        };

        assert_eq!(err.tag(), "snowflake");
        assert_eq!(
            err.to_string(),
            "invoke generator snowflake: generate next value fail"
        );
        let source = err.source().expect("cause attached");
        assert_eq!(source.to_string(), "generate next value fail");
    }

    #[test]
    fn unregistered_tag_names_the_offender() {
        let err = DispatchError::UnregisteredTag {
            tag: "display_id".to_string(),
        };
        assert_eq!(err.to_string(), "unregistered tag display_id");
        assert_eq!(err.tag(), "display_id");
    }
}
