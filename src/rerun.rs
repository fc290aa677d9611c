//! Re-running the current command for regeneration.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

/// Run this executable again with the same raw arguments and wait for it.
///
/// Returns the child's exit code.
pub async fn rerun_current_command() -> io::Result<i32> {
    let program = std::env::current_exe()?;
    let args = forwarded_args(std::env::args_os());
    rerun(&program, &args).await
}

/// The raw arguments of an invocation, without the program name.
pub fn forwarded_args<I>(argv: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    argv.into_iter().skip(1).collect()
}

/// Spawn `program` with `args` and inherited stdio, returning its exit code.
///
/// A child killed by a signal reports exit code 1.
pub async fn rerun(program: &Path, args: &[OsString]) -> io::Result<i32> {
    debug!("Re-running {} with {} argument(s)", program.display(), args.len());

    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await?;

    Ok(status.code().unwrap_or(1))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rerun_returns_child_exit_code() {
        let code = rerun(
            Path::new("/bin/sh"),
            &[OsString::from("-c"), OsString::from("exit 3")],
        )
        .await
        .unwrap();
        assert_eq!(code, 3);
    }

    #[tokio::test]
    async fn test_rerun_forwards_arguments_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("args.txt");
        let script = format!("printf '%s|' \"$@\" > {}", out.display());

        let code = rerun(
            Path::new("/bin/sh"),
            &[
                OsString::from("-c"),
                OsString::from(script),
                OsString::from("sh"),
                OsString::from("-g"),
                OsString::from("2"),
                OsString::from("--no-verify"),
            ],
        )
        .await
        .unwrap();

        assert_eq!(code, 0);
        assert_eq!(std::fs::read_to_string(out).unwrap(), "-g|2|--no-verify|");
    }

    #[test]
    fn test_forwarded_args_drop_program_name_only() {
        let argv = ["commitmoji", "-g", "2", "-x", "Cargo.lock", "--no-verify"].map(OsString::from);
        assert_eq!(
            forwarded_args(argv),
            ["-g", "2", "-x", "Cargo.lock", "--no-verify"].map(OsString::from)
        );
    }

    #[test]
    fn test_forwarded_args_keep_non_utf8_verbatim() {
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(vec![0x66, 0x6f, 0xff]);
        let argv = vec![OsString::from("commitmoji"), raw.clone()];
        assert_eq!(forwarded_args(argv), vec![raw]);
    }

    #[test]
    fn test_forwarded_args_empty_invocation() {
        assert!(forwarded_args(Vec::<OsString>::new()).is_empty());
        assert!(forwarded_args([OsString::from("commitmoji")]).is_empty());
    }

    #[tokio::test]
    async fn test_rerun_missing_program_is_an_error() {
        let result = rerun(Path::new("/nonexistent/commitmoji"), &[]).await;
        assert!(result.is_err());
    }
}
