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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;

/// Everything a browser's `encodeURIComponent` escapes: all
/// non-alphanumerics except `-_.!~*'()`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The LINE deep link that opens a chat with the salon's official account,
/// prefilled with the selected booking message. Returns None when no
/// official id is configured.
pub fn booking_url(line_official_id: &str, message: &str) -> Option<String> {
    if line_official_id.is_empty() {
        return None;
    }
    let id = if line_official_id.starts_with('@') {
        line_official_id.to_string()
    } else {
        format!("@{line_official_id}")
    };
    let message = utf8_percent_encode(message, COMPONENT);
    Some(format!("https://line.me/R/oaMessage/{id}/?{message}"))
}
