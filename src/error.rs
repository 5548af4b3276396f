// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

pub type Fallible<T> = Result<T, EngineError>;

/// The engine's error taxonomy. Every variant is recovered locally; none
/// terminates the process.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EngineError {
    /// Transport failure talking to the remote store. The engine degrades
    /// to local-only mode.
    Connection(String),
    /// Admin login with a password that does not match the stored one.
    WrongPassword,
    /// Password recovery with a code that does not match the recovery code.
    WrongSecurityCode,
    /// New password below the minimum length.
    PasswordTooShort,
    /// Attempt to delete the last remaining designer.
    MinimumDesigner,
    /// Anything else: CLI, configuration, filesystem plumbing.
    Report(String),
}

impl EngineError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn report(message: impl Into<String>) -> Self {
        Self::Report(message.into())
    }
}

pub fn fail<T>(message: &str) -> Fallible<T> {
    Err(EngineError::report(message))
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            EngineError::Connection(message) => {
                write!(f, "error: remote store unavailable: {message}")
            }
            EngineError::WrongPassword => write!(f, "error: wrong password."),
            EngineError::WrongSecurityCode => write!(f, "error: wrong security code."),
            EngineError::PasswordTooShort => {
                write!(f, "error: the password must be at least 4 characters.")
            }
            EngineError::MinimumDesigner => {
                write!(f, "error: at least one designer must remain.")
            }
            EngineError::Report(message) => write!(f, "error: {message}"),
        }
    }
}

impl Error for EngineError {}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Connection(e.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Connection(e.to_string())
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(e: toml::de::Error) -> Self {
        EngineError::Report(e.to_string())
    }
}
