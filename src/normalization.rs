/// A single text transform in the identifier pipeline.
///
/// Every stage is infallible: input it cannot use passes through or is dropped.
pub trait Normalizer {
    fn normal_text(&self, s: &str) -> String;
}
