//! Line-ending profile of a file.
//!
//! Operations that inject newlines (insert, move, append) reuse whatever
//! convention the file already follows. The profile is taken from the first
//! newline scalar found; files with no newline at all default to LF.

/// The newline literal used when an operation must insert a line break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
    Cr,
}

impl LineEnding {
    /// Probe `raw` for the first `\r\n`, `\n`, or `\r` (in that priority at
    /// the first hit).
    pub fn detect(raw: &[char]) -> Self {
        for (i, &c) in raw.iter().enumerate() {
            match c {
                '\r' => {
                    return if raw.get(i + 1) == Some(&'\n') {
                        Self::CrLf
                    } else {
                        Self::Cr
                    };
                }
                '\n' => return Self::Lf,
                _ => {}
            }
        }
        Self::Lf
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(s: &str) -> LineEnding {
        let raw: Vec<char> = s.chars().collect();
        LineEnding::detect(&raw)
    }

    #[test]
    fn test_detects_lf() {
        assert_eq!(detect("a\nb\r\nc"), LineEnding::Lf);
    }

    #[test]
    fn test_detects_crlf() {
        assert_eq!(detect("a\r\nb\nc"), LineEnding::CrLf);
    }

    #[test]
    fn test_detects_bare_cr() {
        assert_eq!(detect("a\rb"), LineEnding::Cr);
    }

    #[test]
    fn test_defaults_to_lf() {
        assert_eq!(detect(""), LineEnding::Lf);
        assert_eq!(detect("no newline here"), LineEnding::Lf);
    }

    #[test]
    fn test_crlf_at_start() {
        assert_eq!(detect("\r\nrest"), LineEnding::CrLf);
    }
}
