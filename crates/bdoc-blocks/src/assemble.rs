//! Concurrent, order-preserving highlighting of a block's files.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bdoc_core::HighlightedFile;
use bdoc_highlight::{HighlightError, Highlighter};
use bdoc_transform::TransformedFile;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::BlockError;

/// Limits applied to one block's highlight jobs.
#[derive(Debug, Clone, Copy)]
pub struct HighlightLimits {
    pub timeout: Duration,
    pub max_concurrency: usize,
}

/// A transformed file waiting for its markup.
pub struct PendingFile {
    pub language: &'static str,
    pub file: TransformedFile,
}

/// Highlight every file concurrently and return them in input order.
///
/// Each job runs on the blocking pool under `limits.timeout`; at most
/// `limits.max_concurrency` run at once. The first failure aborts the
/// remaining jobs and is returned.
pub async fn highlight_files(
    files: Vec<PendingFile>,
    highlighter: &Arc<dyn Highlighter>,
    limits: HighlightLimits,
) -> Result<Vec<HighlightedFile>, BlockError> {
    let semaphore = Arc::new(Semaphore::new(limits.max_concurrency.max(1)));
    let timeout_ms = u64::try_from(limits.timeout.as_millis()).unwrap_or(u64::MAX);

    let mut set = JoinSet::new();
    let mut task_index = HashMap::with_capacity(files.len());
    let mut shells = Vec::with_capacity(files.len());

    for (idx, PendingFile { language, file }) in files.into_iter().enumerate() {
        let TransformedFile {
            target,
            file_type,
            content,
            extra,
        } = file;
        shells.push(HighlightedFile::new(target, file_type, String::new(), extra));

        let highlighter = Arc::clone(highlighter);
        let semaphore = Arc::clone(&semaphore);
        let handle = set.spawn(async move {
            let result = async {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| HighlightError::Aborted(e.to_string()))?;
                let job =
                    tokio::task::spawn_blocking(move || highlighter.highlight(&content, language));
                match tokio::time::timeout(limits.timeout, job).await {
                    Ok(Ok(rendered)) => rendered,
                    Ok(Err(join)) => Err(HighlightError::Aborted(join.to_string())),
                    Err(_) => Err(HighlightError::TimedOut { timeout_ms }),
                }
            }
            .await;
            (idx, result)
        });
        task_index.insert(handle.id(), idx);
    }

    let mut slots: Vec<Option<String>> = vec![None; shells.len()];
    while let Some(joined) = set.join_next().await {
        let (idx, result) = match joined {
            Ok(done) => done,
            Err(join) => {
                let idx = task_index.get(&join.id()).copied().unwrap_or_default();
                (idx, Err(HighlightError::Aborted(join.to_string())))
            }
        };
        match result {
            Ok(rendered) => slots[idx] = Some(rendered),
            Err(source) => {
                set.abort_all();
                let target = shells
                    .get(idx)
                    .map(|file| file.target.clone())
                    .unwrap_or_default();
                tracing::warn!(%target, %source, "highlighting failed");
                return Err(BlockError::Highlight { target, source });
            }
        }
    }

    Ok(shells
        .into_iter()
        .zip(slots)
        .map(|(mut file, rendered)| {
            file.highlighted_content = rendered.unwrap_or_default();
            file
        })
        .collect())
}
