// call.rs — Process gateway for the git binary.
//
// All git traffic in the workspace funnels through GitCall::run: one
// blocking subprocess per invocation, stdout/stderr captured, unexpected
// exit codes turned into structured errors. Stdout is kept in two forms:
// trimmed (ref and branch queries) and verbatim (blob content reads).

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::GitError;

/// Result of one git command execution.
#[derive(Debug, Clone)]
pub struct GitCall {
    pub code: i32,
    /// Stdout with trailing whitespace trimmed.
    pub stdout: String,
    /// Stdout exactly as emitted. Use this for anything content-bearing,
    /// e.g. blob reads and patches, where trailing newlines are data.
    pub raw_stdout: String,
    pub stderr: String,
}

impl GitCall {
    /// Run a git command synchronously.
    ///
    /// `expect_codes` is the set of acceptable exit codes; an empty slice
    /// accepts any code (callers then branch on `code` themselves).
    pub fn run(
        working_dir: Option<&Path>,
        args: &[&str],
        stdin: Option<&str>,
        expect_codes: &[i32],
    ) -> Result<Self, GitError> {
        Self::run_with_env(working_dir, args, stdin, expect_codes, &[])
    }

    /// Like [`GitCall::run`], with extra environment variables for the
    /// child process (e.g. `GIT_INDEX_FILE` for scratch-index work).
    pub fn run_with_env(
        working_dir: Option<&Path>,
        args: &[&str],
        stdin: Option<&str>,
        expect_codes: &[i32],
        env: &[(&str, &str)],
    ) -> Result<Self, GitError> {
        tracing::debug!(?args, cwd = ?working_dir, "running git command");

        let mut command = Command::new("git");
        command
            .args(args)
            // Pin the locale so git's diagnostics stay machine-readable.
            .env("LC_ALL", "C")
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in env {
            command.env(key, value);
        }
        if let Some(dir) = working_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|source| GitError::Spawn {
            command: args.join(" "),
            source,
        })?;

        if let Some(input) = stdin {
            // The pipe was requested above, so stdin is present here.
            if let Some(mut handle) = child.stdin.take() {
                handle
                    .write_all(input.as_bytes())
                    .map_err(|source| GitError::Spawn {
                        command: args.join(" "),
                        source,
                    })?;
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|source| GitError::Spawn {
                command: args.join(" "),
                source,
            })?;

        let code = output.status.code().unwrap_or(-1);
        let raw_stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stdout = raw_stdout.trim_end().to_string();
        let call = Self {
            code,
            stdout,
            raw_stdout,
            stderr: String::from_utf8_lossy(&output.stderr)
                .trim_end()
                .to_string(),
        };

        if !expect_codes.is_empty() && !expect_codes.contains(&code) {
            return Err(GitError::Command {
                command: args.join(" "),
                code,
                stderr: call.stderr,
            });
        }
        Ok(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_reports_version() {
        let call = GitCall::run(None, &["--version"], None, &[0]).unwrap();
        assert_eq!(call.code, 0);
        assert!(call.stdout.starts_with("git version"));
    }

    #[test]
    fn unexpected_code_is_an_error() {
        let result = GitCall::run(None, &["not-a-real-subcommand"], None, &[0]);
        assert!(matches!(result, Err(GitError::Command { .. })));
    }

    #[test]
    fn any_code_accepted_with_empty_set() {
        let call = GitCall::run(None, &["not-a-real-subcommand"], None, &[]).unwrap();
        assert_ne!(call.code, 0);
    }

    #[test]
    fn stdin_is_forwarded() {
        // `git stripspace` echoes its input with whitespace normalized and
        // needs no repository.
        let call = GitCall::run(None, &["stripspace"], Some("hello\n\n\n"), &[0]).unwrap();
        assert_eq!(call.stdout, "hello");
    }

    #[test]
    fn raw_stdout_is_kept_verbatim() {
        let call = GitCall::run(None, &["stripspace"], Some("hello\n\n\n"), &[0]).unwrap();
        assert_eq!(call.raw_stdout, "hello\n");
        assert_eq!(call.stdout, "hello");
    }

    #[test]
    fn output_is_trimmed() {
        let call = GitCall::run(None, &["--version"], None, &[0]).unwrap();
        assert!(!call.stdout.ends_with('\n'));
        assert!(call.raw_stdout.ends_with('\n'));
    }
}
