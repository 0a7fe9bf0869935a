// ABOUTME: Pull outcome classification from the engine's progress stream.
// ABOUTME: Classifiers are pluggable; the orchestration only sees PullOutcome.

use crate::runtime::{ImageError, PullLine, PullStream};
use futures::StreamExt;
use serde::Deserialize;

/// What a pull did to the local image store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    /// The image digest was already present; nothing was downloaded.
    Unchanged,
    /// A newer image was fetched.
    Updated,
}

/// Decides a [`PullOutcome`] from pull progress lines.
pub trait PullClassifier: Send + Sync {
    /// Look at the line at `index` (0-based). Returning `Some` ends classification.
    fn observe(&self, index: usize, line: &PullLine) -> Option<PullOutcome>;

    /// Outcome when the stream ends before `observe` decided.
    fn at_end(&self) -> PullOutcome {
        PullOutcome::Updated
    }
}

/// Docker's ordering: the second message is `Digest: ...` when the image is
/// already present, and a layer or pull message otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigestLineClassifier;

const DIGEST_STATUS: &str = "Digest: ";
const DIGEST_LINE_PREFIX: &str = r#"{"status":"Digest: "#;

impl PullClassifier for DigestLineClassifier {
    fn observe(&self, index: usize, line: &PullLine) -> Option<PullOutcome> {
        if index == 0 {
            return None;
        }

        let digest_present = match line.status() {
            Some(status) => status.starts_with(DIGEST_STATUS),
            None => line.as_str().starts_with(DIGEST_LINE_PREFIX),
        };
        Some(if digest_present {
            PullOutcome::Unchanged
        } else {
            PullOutcome::Updated
        })
    }
}

/// Waits for the engine's closing `Status:` message instead of relying on
/// message order.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusMessageClassifier;

impl PullClassifier for StatusMessageClassifier {
    fn observe(&self, _index: usize, line: &PullLine) -> Option<PullOutcome> {
        let status = line.status()?;
        if status.starts_with("Status: Image is up to date") {
            Some(PullOutcome::Unchanged)
        } else if status.starts_with("Status: Downloaded newer image") {
            Some(PullOutcome::Updated)
        } else {
            None
        }
    }
}

/// Classifier selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierKind {
    /// Decide on the second progress message (`Digest:` means unchanged).
    #[default]
    DigestLine,
    /// Decide on the final `Status:` message.
    StatusMessage,
}

impl ClassifierKind {
    pub fn classifier(self) -> Box<dyn PullClassifier> {
        match self {
            ClassifierKind::DigestLine => Box::new(DigestLineClassifier),
            ClassifierKind::StatusMessage => Box::new(StatusMessageClassifier),
        }
    }
}

/// Read a pull stream until `classifier` decides.
///
/// An `Unchanged` pull is abandoned as soon as it is recognised. An `Updated`
/// pull is read to the end so the engine finishes writing the new layers.
/// The stream is dropped, closing the connection, on every return path.
pub(crate) async fn classify_pull(
    mut stream: PullStream,
    classifier: &dyn PullClassifier,
) -> Result<PullOutcome, ImageError> {
    let mut index = 0;
    while let Some(line) = stream.next().await {
        let line = line?;
        tracing::debug!("pull: {}", line);

        if let Some(outcome) = classifier.observe(index, &line) {
            if outcome == PullOutcome::Updated {
                while let Some(line) = stream.next().await {
                    let line = line?;
                    tracing::debug!("pull: {}", line);
                }
            }
            return Ok(outcome);
        }
        index += 1;
    }

    Ok(classifier.at_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn line(raw: &str) -> PullLine {
        PullLine::new(raw)
    }

    /// Stream over `lines` that counts how many were consumed.
    fn counted(lines: &[&str]) -> (PullStream, Arc<AtomicUsize>) {
        let read = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&read);
        let items: Vec<Result<PullLine, ImageError>> =
            lines.iter().map(|l| Ok(line(l))).collect();
        let stream = stream::iter(items).inspect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (Box::pin(stream), read)
    }

    #[test]
    fn digest_line_ignores_first_line() {
        let classifier = DigestLineClassifier;
        let digest = line(r#"{"status":"Digest: sha256:abc"}"#);
        assert_eq!(classifier.observe(0, &digest), None);
        assert_eq!(classifier.observe(1, &digest), Some(PullOutcome::Unchanged));
    }

    #[test]
    fn digest_line_treats_other_second_lines_as_updated() {
        let classifier = DigestLineClassifier;
        let pulling = line(r#"{"status":"Pulling fs layer","id":"a2abf6c4d29d"}"#);
        assert_eq!(classifier.observe(1, &pulling), Some(PullOutcome::Updated));
    }

    #[test]
    fn digest_line_falls_back_to_raw_prefix() {
        let classifier = DigestLineClassifier;
        let truncated = line(r#"{"status":"Digest: sha256:abc"#);
        assert_eq!(classifier.observe(1, &truncated), Some(PullOutcome::Unchanged));
    }

    #[test]
    fn status_message_waits_for_final_status() {
        let classifier = StatusMessageClassifier;
        assert_eq!(
            classifier.observe(1, &line(r#"{"status":"Digest: sha256:abc"}"#)),
            None
        );
        assert_eq!(
            classifier.observe(
                2,
                &line(r#"{"status":"Status: Image is up to date for nginx:latest"}"#)
            ),
            Some(PullOutcome::Unchanged)
        );
        assert_eq!(
            classifier.observe(
                9,
                &line(r#"{"status":"Status: Downloaded newer image for nginx:latest"}"#)
            ),
            Some(PullOutcome::Updated)
        );
    }

    #[tokio::test]
    async fn unchanged_pull_stops_reading() {
        let (stream, read) = counted(&[
            r#"{"status":"Pulling from library/nginx","id":"latest"}"#,
            r#"{"status":"Digest: sha256:abc"}"#,
            r#"{"status":"Status: Image is up to date for nginx:latest"}"#,
        ]);

        let outcome = classify_pull(stream, &DigestLineClassifier).await.unwrap();

        assert_eq!(outcome, PullOutcome::Unchanged);
        assert_eq!(read.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn updated_pull_is_drained() {
        let (stream, read) = counted(&[
            r#"{"status":"Pulling fs layer"}"#,
            r#"{"status":"Pulling..."}"#,
            r#"{"status":"Extracting","id":"a2abf6c4d29d"}"#,
            r#"{"status":"Status: Downloaded newer image"}"#,
        ]);

        let outcome = classify_pull(stream, &DigestLineClassifier).await.unwrap();

        assert_eq!(outcome, PullOutcome::Updated);
        assert_eq!(read.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn short_stream_counts_as_updated() {
        let (stream, _) = counted(&[r#"{"status":"Pulling from library/nginx"}"#]);

        let outcome = classify_pull(stream, &DigestLineClassifier).await.unwrap();

        assert_eq!(outcome, PullOutcome::Updated);
    }

    #[tokio::test]
    async fn stream_error_while_draining_fails_the_pull() {
        let items = vec![
            Ok(line(r#"{"status":"Pulling fs layer"}"#)),
            Ok(line(r#"{"status":"Pulling..."}"#)),
            Err(ImageError::PullFailed("unexpected EOF".to_string())),
        ];
        let stream: PullStream = Box::pin(stream::iter(items));

        let err = classify_pull(stream, &DigestLineClassifier)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("unexpected EOF"));
    }
}
