/// A guard that runs a cleanup closure when it goes out of scope.
///
/// Used to leave terminal raw mode on every exit path, including `?` returns
/// and panics while a key is being read.
///
/// ```
/// use ted::utils::context::Context;
///
/// let _guard = Context::with(|| {
///     println!("restored");
/// });
/// ```
pub struct Context<AtExit: FnOnce()> {
    exit_cb: Option<AtExit>,
}

impl<F: FnOnce()> Context<F> {
    pub fn with(f: F) -> Self {
        Self { exit_cb: Some(f) }
    }
}

impl<F: FnOnce()> Drop for Context<F> {
    fn drop(&mut self) {
        if let Some(f) = self.exit_cb.take() {
            f()
        }
    }
}
