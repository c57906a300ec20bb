use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error launching `{}`: {}", .command, .original)]
    SubProcess {
        command: String,
        original: std::io::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("No saved command with ID {}.", .0)]
    CommandNotFound(u64),

    #[error("Misc error: {}", .0)]
    Misc(String),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    pub fn sub_process(command: &str, original: std::io::Error) -> Self {
        Self::SubProcess {
            command: command.to_string(),
            original,
        }
    }

    /// True when the error came from the store file rather than the terminal or a subprocess.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Yaml { .. } | Self::Misc(_))
    }
}
