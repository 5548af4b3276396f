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

use crate::error::EngineError;
use crate::error::Fallible;
use crate::types::document::DEFAULT_ADMIN_PASSWORD;
use crate::types::document::RemoteDocument;

/// The single hard-coded recovery code. Deliberately weak: there is one
/// shared admin identity per deployment.
pub const RECOVERY_CODE: &str = "8888";

/// Minimum admin password length.
pub const MIN_PASSWORD_LEN: usize = 4;

/// Process-local session state: the last-known admin password and LINE
/// official id. Not persisted on its own; both travel with the remote
/// document.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SessionGate {
    admin_password: String,
    line_official_id: String,
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionGate {
    pub fn new() -> Self {
        Self {
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            line_official_id: String::new(),
        }
    }

    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }

    pub fn line_official_id(&self) -> &str {
        &self.line_official_id
    }

    pub fn set_line_official_id(&mut self, id: &str) {
        self.line_official_id = id.to_string();
    }

    /// Mirror the values carried by an inbound remote snapshot.
    pub fn apply_remote(&mut self, doc: &RemoteDocument) {
        self.admin_password = doc.admin_password.clone();
        self.line_official_id = doc.line_official_id.clone();
    }

    /// Compare a login attempt against the last-known admin password.
    pub fn authenticate(&self, candidate: &str) -> Fallible<()> {
        if candidate == self.admin_password {
            Ok(())
        } else {
            Err(EngineError::WrongPassword)
        }
    }

    /// Reset the password to the default, gated by the recovery code.
    pub fn reset_password(&mut self, security_code: &str) -> Fallible<()> {
        if security_code != RECOVERY_CODE {
            return Err(EngineError::WrongSecurityCode);
        }
        self.admin_password = DEFAULT_ADMIN_PASSWORD.to_string();
        Ok(())
    }

    /// Change the password. Rejects passwords under four characters before
    /// mutating anything; the new value is persisted on the next write.
    pub fn change_password(&mut self, new_password: &str) -> Fallible<()> {
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(EngineError::PasswordTooShort);
        }
        self.admin_password = new_password.to_string();
        Ok(())
    }
}
