//! Core parser trait

/// Trait for parsers that turn raw agent output into a typed value
pub trait OutputParser: Send + Sync {
    /// The output type produced by this parser
    type Output;

    /// The error produced when the input is rejected
    type Error: std::error::Error;

    /// Parse the raw output string
    fn parse(&self, raw: &str) -> Result<Self::Output, Self::Error>;

    /// Check if this parser can handle the input
    fn can_parse(&self, raw: &str) -> bool {
        self.parse(raw).is_ok()
    }

    /// Get the parser name for debugging
    fn name(&self) -> &'static str;
}
