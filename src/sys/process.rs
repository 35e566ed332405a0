use std::process::Command;

use {
    Error,
    Result,
};

/// Captured standard output of a successful command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
}

impl CommandOutput {
    /// Decodes raw output, replacing invalid UTF-8 sequences.
    pub fn from_bytes(stdout: &[u8]) -> CommandOutput {
        CommandOutput {
            stdout: String::from_utf8_lossy(stdout).into_owned(),
        }
    }
}

/// Runs external programs on behalf of the MAC controller.
pub trait CommandRunner {
    /// Runs program with args to completion.
    ///
    /// Implementations must fail with `Error::Launch` when the program
    /// cannot be started and `Error::Command` when it exits unsuccessfully.
    fn run(&mut self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Runs commands as child processes of the current process.
#[derive(Clone, Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> SystemRunner {
        SystemRunner {}
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        debug!("Running {} {:?}", program, args);

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|err| Error::Launch {
                program: program.to_string(),
                err,
            })?;

        if !output.status.success() {
            return Err(Error::Command {
                program: program.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(CommandOutput::from_bytes(&output.stdout))
    }
}
