//! Property-based tests for status mapping and error classification.

use alp4_api::{AlpStatus, SequenceId};
use alp4_errors::{AlpError, ErrorSeverity};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_status_code_roundtrip(code in any::<i32>()) {
        match AlpStatus::from_code(code) {
            None => prop_assert_eq!(code, 0),
            Some(status) => prop_assert_eq!(status.code(), code),
        }
    }

    #[test]
    fn test_native_errors_keep_their_status(code in 1001i32..=1030) {
        if let Some(status) = AlpStatus::from_code(code) {
            let err = AlpError::native("AlpSeqControl", status);
            prop_assert_eq!(err.status(), Some(status));
            let code_text = code.to_string();
            prop_assert!(err.to_string().contains(&code_text));
            prop_assert!(err.severity() >= ErrorSeverity::Error);
        }
    }

    #[test]
    fn test_unknown_sequence_names_the_id(id in any::<u32>()) {
        let err = AlpError::UnknownSequence(SequenceId(id));
        prop_assert!(err.to_string().contains(&id.to_string()));
        prop_assert!(err.is_rejected_locally());
    }

    #[test]
    fn test_buffer_length_message(expected in any::<usize>(), actual in any::<usize>()) {
        let err = AlpError::BufferLength { expected, actual };
        let msg = err.to_string();
        prop_assert!(msg.contains(&expected.to_string()));
        prop_assert!(msg.contains(&actual.to_string()));
        prop_assert_eq!(err.severity(), ErrorSeverity::Warning);
    }
}
