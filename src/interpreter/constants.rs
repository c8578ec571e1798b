// Constants for the WTFZOMFG interpreter

/// Escape sequence in printed text that is written as a real newline
pub const NEWLINE_ESCAPE: &str = "\\n";

/// Default byte budget for the snapshot history (64 MB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 64 * 1024 * 1024;

/// Label name used when a label instruction has no argument
pub const ANONYMOUS_LABEL: &str = "";
