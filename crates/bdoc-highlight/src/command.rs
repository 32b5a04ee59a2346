//! Highlighting through an external program.

use std::io::{Read, Write as _};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::{HighlightError, Highlighter};

/// Placeholder replaced by the language hint in command arguments.
pub const LANG_PLACEHOLDER: &str = "{lang}";

/// How often a running child is checked against its deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Pipes source text through an external highlighter.
///
/// The program reads source on stdin and writes markup to stdout. A non-zero
/// exit status is reported with the program's stderr. With a timeout set, a
/// child still running at the deadline is killed and reaped.
#[derive(Debug, Clone)]
pub struct CommandHighlighter {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandHighlighter {
    /// Build from a full command line. Returns `None` if `argv` is empty.
    #[must_use]
    pub fn new(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout: None,
        })
    }

    /// Kill the child if it has not exited after `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn args_for(&self, language: &str) -> impl Iterator<Item = String> + '_ {
        let language = language.to_string();
        self.args
            .iter()
            .map(move |arg| arg.replace(LANG_PLACEHOLDER, &language))
    }

    /// Wait for the child, killing it once the deadline passes.
    fn wait(&self, child: &mut Child) -> Result<ExitStatus, HighlightError> {
        let Some(timeout) = self.timeout else {
            return Ok(child.wait()?);
        };
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            let now = Instant::now();
            if now >= deadline {
                // The child may exit between the poll and the kill.
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(program = %self.program, ?timeout, "killed highlighter after timeout");
                return Err(HighlightError::TimedOut {
                    timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                });
            }
            std::thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<std::io::Result<Vec<u8>>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn join_reader(
    reader: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
) -> Result<Vec<u8>, HighlightError> {
    match reader.map(JoinHandle::join) {
        None => Ok(Vec::new()),
        Some(Ok(read)) => Ok(read?),
        Some(Err(_)) => Err(HighlightError::Aborted("pipe reader panicked".into())),
    }
}

impl Highlighter for CommandHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        let mut child = Command::new(&self.program)
            .args(self.args_for(language))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Pipes are serviced on their own threads so a chatty child cannot
        // deadlock against us and the deadline can be polled.
        let writer = child.stdin.take().map(|mut stdin| {
            let source = code.to_string();
            std::thread::spawn(move || stdin.write_all(source.as_bytes()))
        });
        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);

        // On timeout the pipe threads are left to finish on their own once
        // the killed child's pipes close.
        let status = self.wait(&mut child)?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                // The child may exit without consuming its input.
                Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => return Err(HighlightError::Aborted("stdin writer panicked".into())),
            }
        }
        let stdout = join_reader(stdout)?;
        let stderr = join_reader(stderr)?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr);
            return Err(HighlightError::Failed {
                language: language.to_string(),
                message: format!("{} exited with {}: {}", self.program, status, stderr.trim()),
            });
        }

        String::from_utf8(stdout).map_err(|e| HighlightError::Failed {
            language: language.to_string(),
            message: format!("output is not UTF-8: {e}"),
        })
    }

    fn name(&self) -> &'static str {
        "command"
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn is_running(pid: &str) -> bool {
        Command::new("kill")
            .args(["-0", pid])
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success())
    }

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(CommandHighlighter::new(&[]).is_none());
    }

    #[test]
    fn pipes_source_through_program() {
        let hl = CommandHighlighter::new(&argv(&["cat"])).unwrap();
        assert_eq!(hl.highlight("const x = 1;\n", "typescript").unwrap(), "const x = 1;\n");
    }

    #[test]
    fn substitutes_language_placeholder() {
        let hl = CommandHighlighter::new(&argv(&["sh", "-c", "printf 'lang=%s' \"$0\"", "{lang}"]))
            .unwrap();
        assert_eq!(hl.highlight("ignored", "svelte").unwrap(), "lang=svelte");
    }

    #[test]
    fn non_zero_exit_reports_stderr() {
        let hl = CommandHighlighter::new(&argv(&["sh", "-c", "echo boom >&2; exit 3"])).unwrap();
        match hl.highlight("x", "css") {
            Err(HighlightError::Failed { language, message }) => {
                assert_eq!(language, "css");
                assert!(message.contains("boom"), "{message}");
            }
            other => panic!("Expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_io_error() {
        let hl = CommandHighlighter::new(&argv(&["bdoc-definitely-not-a-real-program"])).unwrap();
        assert!(matches!(hl.highlight("x", "text"), Err(HighlightError::Io(_))));
    }

    #[test]
    fn timeout_kills_the_child() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("pid");
        let script = format!("echo $$ > '{}'; exec sleep 37", pid_file.display());
        let hl = CommandHighlighter::new(&argv(&["sh", "-c", &script]))
            .unwrap()
            .with_timeout(Duration::from_millis(200));

        let started = Instant::now();
        let err = hl.highlight("x", "text").unwrap_err();
        assert!(matches!(err, HighlightError::TimedOut { timeout_ms: 200 }));
        assert!(started.elapsed() < Duration::from_secs(5));

        let pid = std::fs::read_to_string(&pid_file).unwrap();
        assert!(!is_running(pid.trim()), "highlighter {} still running", pid.trim());
    }

    #[test]
    fn fast_child_finishes_within_timeout() {
        let hl = CommandHighlighter::new(&argv(&["cat"]))
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        assert_eq!(hl.highlight("<b>", "html").unwrap(), "<b>");
    }
}
