use anyhow::Result;

/// External markup-to-text collaborator. Implementations may fail on
/// malformed input; the pipeline turns a failure into an absent result for
/// that one file and keeps going.
pub trait Converter: Sync {
    fn convert(&self, markup: &str) -> Result<String>;
}

/// Production converter backed by html2text.
pub struct Html2TextConverter {
    width: usize,
}

impl Html2TextConverter {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

impl Converter for Html2TextConverter {
    fn convert(&self, markup: &str) -> Result<String> {
        Ok(html2text::from_read(markup.as_bytes(), self.width))
    }
}
