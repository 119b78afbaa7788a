//! This module defines the `Command` enum and its associated methods for parsing
//! the lines typed at the `mfs>` prompt.

/// Represents a user command in the FAT32 navigator.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Command to quit the program.
    Quit,
    /// Command to open a disk image, encapsulating the file path.
    Open(String),
    /// Command to close the open image.
    Close,
    /// Print the boot sector parameters and the image layout.
    Info,
    /// List the working directory.
    Ls,
    /// Print the attribute, cluster and size of an entry.
    Stat(String),
    /// Change the working directory.
    Cd(String),
    /// Extract a file into the local directory.
    Get(String),
    /// Print `count` bytes of a file from `position`.
    Read {
        name: String,
        position: u64,
        count: usize,
    },
    /// Command for an unknown input, encapsulating the raw input as a `String`.
    Unknown(String),
    /// Command for invalid input, encapsulating an error message as a `String`.
    Invalid(String),
    /// Command for an empty input.
    Empty,
}

impl Command {
    /// Parses a string into a `Command` instance.
    ///
    /// # Parameters
    /// - `s`: A string slice representing the user input.
    ///
    /// # Returns
    /// - The matching command when the input is well formed
    /// - `Command::Invalid` when a known command lacks an argument or gets a malformed one
    /// - `Command::Unknown` if the input does not match any known command
    /// - `Command::Empty` if the input is empty or contains only whitespace
    pub fn from_string(s: &str) -> Self {
        let mut parts = s.split_whitespace();
        let cmd = parts.next();
        let mut arg = |command: &str, what: &str| {
            parts
                .next()
                .map(str::to_string)
                .ok_or_else(|| format!("Missing arg: '{command}' expects {what}."))
        };

        let parsed = match cmd {
            Some("quit" | "exit" | "stop") => Ok(Command::Quit),
            Some("open") => arg("open", "the path to an image file").map(Command::Open),
            Some("close") => Ok(Command::Close),
            Some("info") => Ok(Command::Info),
            Some("ls") => Ok(Command::Ls),
            Some("stat") => arg("stat", "a file or directory name").map(Command::Stat),
            Some("cd") => arg("cd", "a directory path").map(Command::Cd),
            Some("get") => arg("get", "a file name").map(Command::Get),
            Some("read") => Self::parse_read(s),
            Some(other) => Ok(Command::Unknown(other.to_string())),
            None => Ok(Command::Empty),
        };

        parsed.unwrap_or_else(Command::Invalid)
    }

    fn parse_read(s: &str) -> Result<Command, String> {
        let mut parts = s.split_whitespace().skip(1);
        let (Some(name), Some(position), Some(count)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(String::from(
                "Missing arg: 'read' expects a file name, a position and a byte count.",
            ));
        };

        let position = position.parse::<u64>().map_err(|_| {
            String::from("Arg parsing error: 'read' expects an unsigned integer position.")
        })?;
        let count = count.parse::<usize>().map_err(|_| {
            String::from("Arg parsing error: 'read' expects an unsigned integer byte count.")
        })?;

        Ok(Command::Read {
            name: name.to_string(),
            position,
            count,
        })
    }
}
