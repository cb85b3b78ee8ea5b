use crate::utils::config::DEFAULT_DETAIL_HEIGHT;
use std::path::PathBuf;

/// Arguments for the browse command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct BrowseArgs {
    /// Goroutine dump to read
    pub input: PathBuf,

    /// Call-stack lines shown per entry in the viewer
    pub detail_height: usize,

    /// Print the grouped dump to stdout instead of opening the viewer
    pub print: bool,

    /// Print grouping statistics to stdout
    pub summary: bool,

    /// Output path for a JSON report (optional)
    pub output_json: Option<PathBuf>,
}

impl BrowseArgs {
    /// True when no batch output was requested and the viewer should run
    pub fn interactive(&self) -> bool {
        !self.print && !self.summary && self.output_json.is_none()
    }
}

impl Default for BrowseArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            detail_height: DEFAULT_DETAIL_HEIGHT,
            print: false,
            summary: false,
            output_json: None,
        }
    }
}
