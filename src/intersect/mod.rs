//! Lazy intersection of k sorted sequences.
//!
//! Every input must be strictly increasing. This is not checked: unsorted or
//! duplicated inputs give an unspecified (but memory-safe) result. In
//! particular, a value repeated in every input may be yielded more than once,
//! so the output is not deduplicated.

pub mod gallop;

use smallvec::SmallVec;
use std::iter::FusedIterator;

use gallop::gallop_to;

#[derive(Debug, Clone)]
struct Cursor<'a, T> {
    seq: &'a [T],
    pos: usize,
}

impl<'a, T> Cursor<'a, T> {
    #[inline]
    fn head(&self) -> Option<&'a T> {
        self.seq.get(self.pos)
    }
    #[inline]
    fn remaining(&self) -> usize {
        self.seq.len().saturating_sub(self.pos)
    }
}

/// Iterator over the elements common to every input, in increasing order.
///
/// Holds one cursor per input; cursors only move forward, so every input is
/// walked at most once. Not restartable: build a new one to traverse again.
#[derive(Debug, Clone)]
pub struct IntersectSorted<'a, T> {
    cursors: SmallVec<[Cursor<'a, T>; 8]>,
    done: bool,
}

impl<'a, T: Ord> IntersectSorted<'a, T> {
    pub fn new<I>(sequences: I) -> Self
    where
        I: IntoIterator<Item = &'a [T]>,
    {
        let cursors: SmallVec<[Cursor<'a, T>; 8]> = sequences
            .into_iter()
            .map(|seq| Cursor { seq, pos: 0 })
            .collect();
        let done = cursors.is_empty() || cursors.iter().any(|c| c.seq.is_empty());
        Self { cursors, done }
    }

    /// Number of input sequences.
    pub fn arity(&self) -> usize {
        self.cursors.len()
    }

    fn step(&mut self) -> Option<&'a T> {
        loop {
            let mut max = self.cursors[0].head()?;
            for c in &self.cursors[1..] {
                let h = c.head()?;
                if h > max {
                    max = h;
                }
            }

            let mut aligned = true;
            for c in self.cursors.iter_mut() {
                let h = c.head()?;
                if h < max {
                    c.pos = gallop_to(c.seq, max, c.pos);
                }
                match c.head() {
                    None => return None,
                    Some(h) if h != max => aligned = false,
                    Some(_) => {}
                }
            }

            if aligned {
                for c in self.cursors.iter_mut() {
                    c.pos += 1;
                }
                return Some(max);
            }
        }
    }
}

impl<'a, T: Ord> Iterator for IntersectSorted<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let out = self.step();
        if out.is_none() {
            self.done = true;
        }
        out
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let upper = self.cursors.iter().map(Cursor::remaining).min();
        (0, upper)
    }
}

impl<'a, T: Ord> FusedIterator for IntersectSorted<'a, T> {}

/// Intersect any number of strictly increasing sequences lazily.
///
/// Zero inputs yield nothing; one input yields its own elements; an empty
/// input anywhere yields nothing.
pub fn intersect_sorted<'a, T, S>(sequences: &'a [S]) -> IntersectSorted<'a, T>
where
    T: Ord,
    S: AsRef<[T]>,
{
    IntersectSorted::new(sequences.iter().map(AsRef::as_ref))
}
