/// Runs a terminal restore step when dropped.
///
/// Created right after the matching setup step succeeds, so an early `?`
/// return or a panic later in setup still undoes it. Guards drop in reverse
/// order of creation, which undoes setup steps in reverse.
pub struct RestoreGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> RestoreGuard<F> {
    pub fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}
