//! Factory Method
//! Example: Cross-Platform Command-Line Interface
//!
//! Callers describe a command once and let a platform-specific creator decide
//! which concrete terminal product gets built.

use itertools::Itertools;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FactoryError {
    #[error("Command name must not be empty")]
    EmptyCommand,

    #[error("Unknown platform '{0}' (expected windows, linux or generic)")]
    UnknownPlatform(String),
}

// =============================================================================
// Products
// =============================================================================

pub trait Terminal {
    fn command(&self) -> &str;
    fn args(&self) -> &[String];

    /// Render the invocation this terminal would run.
    fn execute(&self) -> String;

    fn command_line(&self) -> String {
        std::iter::once(self.command())
            .chain(self.args().iter().map(String::as_str))
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenericTerminal {
    command: String,
    args: Vec<String>,
}

impl Terminal for GenericTerminal {
    fn command(&self) -> &str {
        &self.command
    }

    fn args(&self) -> &[String] {
        &self.args
    }

    fn execute(&self) -> String {
        format!("Would execute {}", self.command_line())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Powershell {
    command: String,
    args: Vec<String>,
}

impl Terminal for Powershell {
    fn command(&self) -> &str {
        &self.command
    }

    fn args(&self) -> &[String] {
        &self.args
    }

    fn execute(&self) -> String {
        format!("Executing Powershell \"{}\"", self.command_line())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bash {
    command: String,
    args: Vec<String>,
}

impl Terminal for Bash {
    fn command(&self) -> &str {
        &self.command
    }

    fn args(&self) -> &[String] {
        &self.args
    }

    fn execute(&self) -> String {
        format!("Executing bash -c \"{}\"", self.command_line())
    }
}

// =============================================================================
// Creators
// =============================================================================

/// What every creator knows before it decides on a product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandSpec {
    command: String,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn new(command: impl Into<String>) -> Result<Self, FactoryError> {
        let command = command.into();
        if command.trim().is_empty() {
            return Err(FactoryError::EmptyCommand);
        }
        Ok(Self {
            command,
            args: Vec::new(),
        })
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

pub trait TerminalFactory {
    fn spec(&self) -> &CommandSpec;
    fn spec_mut(&mut self) -> &mut CommandSpec;

    /// The factory method itself.
    fn create(&self) -> Box<dyn Terminal>;

    fn arg(&mut self, arg: impl Into<String>) -> &mut Self
    where
        Self: Sized,
    {
        self.spec_mut().args.push(arg.into());
        self
    }

    fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        Self: Sized,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec_mut().args.extend(args.into_iter().map(Into::into));
        self
    }
}

macro_rules! creator {
    ($(#[$meta:meta])* $factory:ident => $product:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $factory {
            spec: CommandSpec,
        }

        impl $factory {
            pub fn new(command: impl Into<String>) -> Result<Self, FactoryError> {
                Ok(Self {
                    spec: CommandSpec::new(command)?,
                })
            }
        }

        impl TerminalFactory for $factory {
            fn spec(&self) -> &CommandSpec {
                &self.spec
            }

            fn spec_mut(&mut self) -> &mut CommandSpec {
                &mut self.spec
            }

            fn create(&self) -> Box<dyn Terminal> {
                Box::new($product {
                    command: self.spec.command.clone(),
                    args: self.spec.args.clone(),
                })
            }
        }
    };
}

creator!(
    /// Creates terminals that only describe what they would run.
    GenericFactory => GenericTerminal
);
creator!(
    /// Creates Powershell commands.
    WindowsFactory => Powershell
);
creator!(
    /// Creates bash commands.
    LinuxFactory => Bash
);

// =============================================================================
// Picking a creator
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    Generic,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(unix) {
            Platform::Linux
        } else {
            Platform::Generic
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = FactoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" | "win32" => Ok(Platform::Windows),
            "linux" | "unix" => Ok(Platform::Linux),
            "generic" => Ok(Platform::Generic),
            other => Err(FactoryError::UnknownPlatform(other.to_string())),
        }
    }
}

/// Build the product for `platform` from a command and its arguments.
pub fn create_for<I, S>(
    platform: Platform,
    command: &str,
    args: I,
) -> Result<Box<dyn Terminal>, FactoryError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let terminal = match platform {
        Platform::Windows => WindowsFactory::new(command)?.args(args).create(),
        Platform::Linux => LinuxFactory::new(command)?.args(args).create(),
        Platform::Generic => GenericFactory::new(command)?.args(args).create(),
    };
    Ok(terminal)
}
