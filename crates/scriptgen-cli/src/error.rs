use std::fmt;
use std::process::ExitCode;

use scriptgen_core::buildscript::BuildScriptError;
use scriptgen_core::descriptor::DescriptorError;
use scriptgen_core::render::RenderError;

#[derive(Debug)]
pub enum CliError {
    Descriptor(DescriptorError),
    Generation(BuildScriptError),
    Io(std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Generation(_) => ExitCode::from(1),
            CliError::Descriptor(_) => ExitCode::from(2),
            CliError::Io(_) => ExitCode::from(4),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Descriptor(e) => write!(f, "Descriptor error: {}", e),
            CliError::Generation(e) => write!(f, "Generation failed: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<DescriptorError> for CliError {
    fn from(e: DescriptorError) -> Self {
        CliError::Descriptor(e)
    }
}

impl From<BuildScriptError> for CliError {
    fn from(e: BuildScriptError) -> Self {
        CliError::Generation(e)
    }
}

impl From<RenderError> for CliError {
    fn from(e: RenderError) -> Self {
        CliError::Generation(BuildScriptError::Render(e))
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_errors_count_as_generation_failures() {
        let err = CliError::from(RenderError::EmptyName { kind: "call" });
        assert!(matches!(err, CliError::Generation(BuildScriptError::Render(_))));
        assert_eq!(err.to_string(), "Generation failed: Render error: call statement has an empty name");
    }

    #[test]
    fn io_errors_keep_their_message() {
        let err = CliError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(matches!(err, CliError::Io(_)));
        assert_eq!(err.to_string(), "IO error: gone");
    }
}
