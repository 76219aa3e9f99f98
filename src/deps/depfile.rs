// src/deps/depfile.rs

//! Parser for compiler-emitted dependency files (`*.d`).
//!
//! ```text
//! pipelines/compiled/basic_MAIN0_vs.shb : pipelines/basic_vs.sc \
//!     pipelines/common.sh \
//!     pipelines/varying.def.sc
//! ```
//!
//! The first token of the first line is the binary the file documents.
//! Every following line contributes its first token as a consulted input;
//! the rest of the line (make syntax such as `:` or `\`) is discarded.

/// Extension of dependency files in the compiled directory.
pub const DEPFILE_EXTENSION: &str = "d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepFile {
    pub variant: String,
    pub inputs: Vec<String>,
}

fn first_token(line: &str) -> Option<&str> {
    let token = line.split_whitespace().next()?;
    let token = token.trim_end_matches(':');
    if token.is_empty() || token == "\\" {
        None
    } else {
        Some(token)
    }
}

/// Parse a dependency file; `None` if it does not name a binary.
pub fn parse_depfile(text: &str) -> Option<DepFile> {
    let mut lines = text.lines();
    let variant = first_token(lines.next()?)?.to_string();
    let inputs = lines.filter_map(first_token).map(str::to_string).collect();
    Some(DepFile { variant, inputs })
}
