use crate::error::GenerationError;
use crate::options::GenerationOptions;

/// A capability that turns one input text into one summary.
///
/// Implementations are bound to their model at construction and must not
/// need mutable access to generate.
pub trait SummaryGenerator {
    fn generate(&self, text: &str, options: &GenerationOptions) -> Result<String, GenerationError>;
}

impl<G: SummaryGenerator + ?Sized> SummaryGenerator for Box<G> {
    fn generate(&self, text: &str, options: &GenerationOptions) -> Result<String, GenerationError> {
        (**self).generate(text, options)
    }
}

impl<G: SummaryGenerator + ?Sized> SummaryGenerator for std::sync::Arc<G> {
    fn generate(&self, text: &str, options: &GenerationOptions) -> Result<String, GenerationError> {
        (**self).generate(text, options)
    }
}
