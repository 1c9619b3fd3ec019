use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

/// Runs external commands on behalf of a repository adapter
pub trait Executor {
    /// Run `program` with `args` and return its standard output line by line.
    ///
    /// A non-zero exit status is an error carrying the command's stderr.
    fn output_of(&self, program: &str, args: &[&str]) -> io::Result<Vec<String>>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn output_of(&self, program: &str, args: &[&str]) -> io::Result<Vec<String>> {
        (**self).output_of(program, args)
    }
}

/// Executes commands as child processes within a working directory
#[derive(Debug, Clone)]
pub struct SystemExecutor {
    workdir: PathBuf,
}

impl SystemExecutor {
    pub fn new(workdir: impl AsRef<Path>) -> Self {
        SystemExecutor {
            workdir: workdir.as_ref().to_path_buf(),
        }
    }
}

impl Executor for SystemExecutor {
    fn output_of(&self, program: &str, args: &[&str]) -> io::Result<Vec<String>> {
        debug!(program, ?args, workdir = %self.workdir.display(), "executing command");

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.workdir)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} exited with {}: {}", program, output.status, stderr.trim()),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect())
    }
}
