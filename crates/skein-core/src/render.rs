//! Text rendering for vertices and labels stored in graphs.
//!
//! Graph dumps need to print arbitrary payload types. Rather than fall back
//! to some generic "unknown value" output, every type stored in a graph that
//! is dumped implements [`Render`].

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Capability to write a value into a graph dump.
pub trait Render {
    /// Write the textual form of `self`.
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Wrap `self` so it can be used with `{}` formatting.
    fn rendered(&self) -> Rendered<'_, Self> {
        Rendered(self)
    }
}

/// Adapter implementing [`fmt::Display`] for any [`Render`] type.
pub struct Rendered<'a, T: ?Sized>(pub &'a T);

impl<T: Render + ?Sized> fmt::Display for Rendered<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.render(f)
    }
}

impl Render for str {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl Render for String {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl<T: Render + ?Sized> Render for &T {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).render(f)
    }
}

impl<T: Render + ?Sized> Render for Box<T> {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).render(f)
    }
}

impl<T: Render + ?Sized> Render for Rc<T> {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).render(f)
    }
}

impl<T: Render + ?Sized> Render for Arc<T> {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).render(f)
    }
}

macro_rules! render_via_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Render for $ty {
                fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(self, f)
                }
            }
        )*
    };
}

render_via_display!(
    char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl<A: Render, B: Render> Render for (A, B) {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        self.0.render(f)?;
        f.write_str(", ")?;
        self.1.render(f)?;
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_strings_and_numbers() {
        assert_eq!("abc".rendered().to_string(), "abc");
        assert_eq!(String::from("x y").rendered().to_string(), "x y");
        assert_eq!(42u32.rendered().to_string(), "42");
        assert_eq!(Rc::new('z').rendered().to_string(), "z");
    }

    #[test]
    fn test_rendered_pair() {
        assert_eq!((1, "b").rendered().to_string(), "(1, b)");
    }
}
