/// Source of the opaque token values handed out by a pool.
///
/// Implementations shall return a new, pragmatically unique value on each call.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

impl<F> TokenGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}
