//! Batch request configuration.

/// A set of raw codes to analyse together.
pub struct BatchRequest {
    /// Raw codes, in input order
    pub codes: Vec<String>,
    /// Max codes per parallel chunk
    pub chunk_size: usize,
    /// Optional progress callback: (analysed so far, total)
    pub on_progress: Option<Box<dyn Fn(usize, usize) + Send + Sync>>,
}

impl BatchRequest {
    pub fn new(codes: Vec<String>) -> Self {
        Self {
            codes,
            chunk_size: 1_000,
            on_progress: None,
        }
    }

    /// One code per line; surrounding whitespace is trimmed and blank lines
    /// are skipped.
    pub fn from_lines(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn chunk_size(mut self, n: usize) -> Self {
        self.chunk_size = n;
        self
    }

    pub fn on_progress<F: Fn(usize, usize) + Send + Sync + 'static>(mut self, f: F) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_lines_skips_blanks() {
        let req = BatchRequest::from_lines("  500903 \n\n\tH2401B\r\n   \n");
        assert_eq!(req.codes, vec!["500903", "H2401B"]);
        assert_eq!(req.chunk_size, 1_000);
    }
}
