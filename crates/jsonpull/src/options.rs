/// Configuration for [`Scanner`](crate::Scanner) and
/// [`Decoder`](crate::Decoder).
///
/// # Examples
///
/// ```rust
/// use jsonpull::{Decoder, Options};
///
/// let options = Options {
///     initial_buffer_size: 64,
///     ..Default::default()
/// };
/// let mut decoder = Decoder::with_options(&b"[1, 2, 3]"[..], options);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Initial size in bytes of the working buffer the scanner reads into.
    ///
    /// The buffer grows on demand whenever a single token outgrows it, so
    /// this setting has no effect on correctness. Larger buffers reduce
    /// compaction while streaming; small values (including zero) force the
    /// compact and grow paths and are mainly useful in tests.
    ///
    /// # Default
    ///
    /// 8 KiB.
    pub initial_buffer_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            initial_buffer_size: crate::reader::NEW_BUFFER_SIZE,
        }
    }
}
