//! Output helpers for CLI operations.

use std::io::{self, Write};

use aspectra::{AnalysisError, LoadingNotice};

/// Converts an I/O failure into [`AnalysisError::Io`].
pub fn io_error(error: &io::Error) -> AnalysisError {
    AnalysisError::Io {
        message: error.to_string(),
    }
}

/// Writes the model loading notice to the given writer.
///
/// A failed write is ignored: the notice is informational and must never
/// abort model construction.
pub fn write_loading_notice<W: Write>(writer: &mut W, notice: &LoadingNotice) {
    if writeln!(writer, "{} (checkpoint: {})", notice.message, notice.checkpoint).is_err() {
        tracing::debug!("failed to write loading notice");
    }
}

#[cfg(test)]
mod tests {
    use aspectra::LOADING_MESSAGE;

    use super::*;

    #[test]
    fn loading_notice_names_checkpoint() {
        let notice = LoadingNotice {
            checkpoint: "multilingual".to_owned(),
            message: LOADING_MESSAGE,
        };
        let mut buffer = Vec::new();

        write_loading_notice(&mut buffer, &notice);

        let text = String::from_utf8_lossy(&buffer);
        assert_eq!(
            text,
            "Loading ABSA model... This may take a moment on first run. (checkpoint: multilingual)\n"
        );
    }

    #[test]
    fn io_error_keeps_message() {
        let error = io_error(&io::Error::other("broken pipe"));

        assert_eq!(
            error,
            AnalysisError::Io {
                message: "broken pipe".to_owned()
            }
        );
    }
}
