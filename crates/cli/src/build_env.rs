// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use labwired_qemu::EmulatorInvocation;

/// Values the build environment substitutes into registered command lines.
///
/// Recognized references are `$BUILD_DIR`, `${BUILD_DIR}`, `$PROGNAME` and
/// `${PROGNAME}`. Anything else, `$$` included, is left as written.
#[derive(Debug, Clone)]
pub struct BuildEnv {
    pub build_dir: String,
    pub progname: String,
}

impl BuildEnv {
    fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "BUILD_DIR" => Some(self.build_dir.as_str()),
            "PROGNAME" => Some(self.progname.as_str()),
            _ => None,
        }
    }

    pub fn expand(&self, token: &str) -> String {
        let mut out = String::with_capacity(token.len());
        let mut rest = token;

        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            // `$$` is copied through and does not start a reference.
            if let Some(tail) = after.strip_prefix('$') {
                out.push_str("$$");
                rest = tail;
                continue;
            }

            let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
                match braced.find('}') {
                    Some(end) => (&braced[..end], end + 2),
                    None => ("", 0),
                }
            } else {
                let end = after
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(after.len());
                (&after[..end], end)
            };

            match self.lookup(name) {
                Some(value) if consumed > 0 => {
                    out.push_str(value);
                    rest = &after[consumed..];
                }
                _ => {
                    out.push('$');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }

    pub fn resolve(&self, invocation: &EmulatorInvocation) -> EmulatorInvocation {
        invocation.map_tokens(|t| self.expand(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> BuildEnv {
        BuildEnv {
            build_dir: ".pio/build/netduino".to_string(),
            progname: "firmware".to_string(),
        }
    }

    #[test]
    fn test_expands_default_artifact() {
        assert_eq!(
            env().expand("$BUILD_DIR/${PROGNAME}.elf"),
            ".pio/build/netduino/firmware.elf"
        );
    }

    #[test]
    fn test_unknown_references_are_kept() {
        assert_eq!(env().expand("$HOME/${UNSET}/x"), "$HOME/${UNSET}/x");
        assert_eq!(env().expand("${BUILD_DIR"), "${BUILD_DIR");
        assert_eq!(env().expand("cost: 5$"), "cost: 5$");
    }

    #[test]
    fn test_double_dollar_is_literal() {
        assert_eq!(env().expand("echo $$"), "echo $$");
        assert_eq!(env().expand("$$BUILD_DIR"), "$$BUILD_DIR");
        assert_eq!(env().expand("sh -c 'kill $$'"), "sh -c 'kill $$'");
        assert_eq!(env().expand("$$$PROGNAME"), "$$firmware");
    }

    #[test]
    fn test_adjacent_text() {
        assert_eq!(env().expand("path=$PROGNAME,id=x"), "path=firmware,id=x");
    }
}
