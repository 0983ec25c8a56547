//! Load progress reporting.
//!
//! The loader calls [`Progress::update`] every `progress_interval` records,
//! on the last record of the input before it is parsed, and once more at end
//! of stream if the last record was not reported. [`Progress::finish`] is called
//! once when loading stops, successfully or not.

use std::io::Write;

/// Receiver of load progress.
pub trait Progress {
    /// `consumed` bytes of `total` have been read. `total` is `None` when
    /// the input length is unknown.
    fn update(&mut self, consumed: u64, total: Option<u64>);

    /// Loading has stopped.
    fn finish(&mut self) {}
}

impl<P: Progress + ?Sized> Progress for &mut P {
    fn update(&mut self, consumed: u64, total: Option<u64>) {
        (**self).update(consumed, total);
    }

    fn finish(&mut self) {
        (**self).finish();
    }
}

impl<P: Progress + ?Sized> Progress for Box<P> {
    fn update(&mut self, consumed: u64, total: Option<u64>) {
        (**self).update(consumed, total);
    }

    fn finish(&mut self) {
        (**self).finish();
    }
}

/// Discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn update(&mut self, _consumed: u64, _total: Option<u64>) {}
}

/// Fraction of the input consumed, in `[0, 1]`. An empty input is complete.
pub fn fraction(consumed: u64, total: Option<u64>) -> f64 {
    match total {
        Some(0) => 1.0,
        Some(total) => (consumed as f64 / total as f64).min(1.0),
        None => 0.0,
    }
}

/// Width of the bar drawn by [`BarProgress`], in characters.
pub const BAR_WIDTH: usize = 50;

/// Draws `\r[#####     ]  42.000%` onto a writer, redrawing in place.
///
/// This is the writer-based bar for library callers; the `skein` binary
/// draws its own terminal bar instead. A newline is written once the bar
/// reaches 100%, or on [`finish`](Progress::finish) if it never did.
///
/// ```rust
/// use skein_core::{BarProgress, Graph, IdentityPool, Symbol, TripleLoader};
///
/// let mut pool = IdentityPool::new();
/// let mut graph: Graph<Symbol> = Graph::new();
/// let mut bar = BarProgress::new(Vec::new()).with_width(4);
/// TripleLoader::new(&mut pool)
///     .with_progress(&mut bar)
///     .load_reader("inline", "a r b .\n".as_bytes(), None, &mut graph)
///     .unwrap();
///
/// let drawn = String::from_utf8(bar.into_inner()).unwrap();
/// assert_eq!(drawn, "\r[####] 100.000%\n");
/// ```
#[derive(Debug)]
pub struct BarProgress<W: Write> {
    writer: W,
    width: usize,
    fill: char,
    open_line: bool,
}

impl<W: Write> BarProgress<W> {
    /// Draw a [`BAR_WIDTH`]-wide bar of `#` onto `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            width: BAR_WIDTH,
            fill: '#',
            open_line: false,
        }
    }

    /// Change the bar width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Change the fill character.
    pub fn with_fill(mut self, fill: char) -> Self {
        self.fill = fill;
        self
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Render one frame for `fraction`, without the leading `\r`.
    pub fn frame(&self, fraction: f64) -> String {
        let filled = ((fraction * self.width as f64) as usize).min(self.width);
        let mut line = String::with_capacity(self.width + 12);
        line.push('[');
        line.extend(std::iter::repeat(self.fill).take(filled));
        line.extend(std::iter::repeat(' ').take(self.width - filled));
        line.push_str("] ");
        line.push_str(&format!("{:7.3}%", 100.0 * fraction));
        line
    }
}

impl<W: Write> Progress for BarProgress<W> {
    fn update(&mut self, consumed: u64, total: Option<u64>) {
        let fraction = fraction(consumed, total);
        let frame = self.frame(fraction);
        // Progress output is best-effort.
        let _ = write!(self.writer, "\r{frame}");
        if fraction >= 1.0 {
            let _ = writeln!(self.writer);
            self.open_line = false;
        } else {
            self.open_line = true;
        }
        let _ = self.writer.flush();
    }

    fn finish(&mut self) {
        if self.open_line {
            let _ = writeln!(self.writer);
            let _ = self.writer.flush();
            self.open_line = false;
        }
    }
}
