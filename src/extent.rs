//! Extents used to select a hyperslab of a variable.
//!
//! An [`Extent`] selects along one dimension, [`Extents`] along all of them. A plain index
//! selects a single element and removes that axis from the result, so `psi[1]` on a
//! `(time, depth)` variable is the one dimensional profile at the second record.

use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// An extent of a dimension
///
/// ```rust
/// # use ncplot::extent::Extent;
/// fn take_extent(e: impl Into<Extent>) {}
/// take_extent(3);
/// take_extent(..);
/// take_extent(..5);
/// take_extent(3..);
/// take_extent(3..=74);
/// // Start at 3 with 74 elements
/// take_extent((3, 74));
/// ```
pub enum Extent {
    /// From `start` to the end of the dimension
    Slice { start: usize },
    /// From `start` up to, but not including, `end`
    SliceEnd { start: usize, end: usize },
    /// `count` elements from `start`
    SliceCount { start: usize, count: usize },
    /// A single element, the axis is dropped
    Index(usize),
}

impl From<usize> for Extent {
    fn from(start: usize) -> Self {
        Self::Index(start)
    }
}

impl From<RangeFrom<usize>> for Extent {
    fn from(range: RangeFrom<usize>) -> Self {
        Self::Slice { start: range.start }
    }
}

impl From<Range<usize>> for Extent {
    fn from(range: Range<usize>) -> Self {
        Self::SliceEnd {
            start: range.start,
            end: range.end,
        }
    }
}

impl From<RangeTo<usize>> for Extent {
    fn from(range: RangeTo<usize>) -> Self {
        Self::SliceEnd {
            start: 0,
            end: range.end,
        }
    }
}

impl From<RangeToInclusive<usize>> for Extent {
    fn from(range: RangeToInclusive<usize>) -> Self {
        Self::SliceEnd {
            start: 0,
            end: range.end.saturating_add(1),
        }
    }
}

impl From<RangeInclusive<usize>> for Extent {
    fn from(range: RangeInclusive<usize>) -> Self {
        Self::SliceEnd {
            start: *range.start(),
            end: range.end().saturating_add(1),
        }
    }
}

impl From<RangeFull> for Extent {
    fn from(_: RangeFull) -> Self {
        Self::Slice { start: 0 }
    }
}

impl From<(usize, usize)> for Extent {
    fn from((start, count): (usize, usize)) -> Self {
        Self::SliceCount { start, count }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A selector for reading from a variable
///
/// ```rust
/// # use ncplot::extent::{Extent, Extents};
/// fn take_extents(extents: impl TryInto<Extents>) {}
/// // Everything
/// take_extents(..);
/// // One element of a one dimensional variable
/// take_extents(1);
/// // Arrays when every dimension uses the same kind of extent
/// take_extents([..10, ..2]);
/// // Tuples for mixed kinds, here the second record of a (time, depth) variable
/// take_extents((1, ..));
/// // Separate start and count
/// take_extents(([0, 2], [2, 4]));
/// // The `ndarray::s!` macro
/// take_extents(ndarray::s![1, ..]);
/// ```
pub enum Extents {
    /// The full variable
    #[default]
    All,
    /// A selection along each dimension
    Extent(Vec<Extent>),
}

impl From<RangeFull> for Extents {
    fn from(_: RangeFull) -> Self {
        Self::All
    }
}

impl From<Vec<Extent>> for Extents {
    fn from(extents: Vec<Extent>) -> Self {
        Self::Extent(extents)
    }
}

impl From<&'_ [Extent]> for Extents {
    fn from(extents: &[Extent]) -> Self {
        Self::Extent(extents.to_owned())
    }
}

impl<const N: usize> From<[Extent; N]> for Extents {
    fn from(extents: [Extent; N]) -> Self {
        Self::Extent(extents.to_vec())
    }
}

impl From<&Self> for Extents {
    fn from(extents: &Self) -> Self {
        extents.clone()
    }
}

macro_rules! impl_single {
    ($($item: ty),*) => {
        $(
            impl From<$item> for Extents {
                fn from(item: $item) -> Self {
                    Self::Extent(vec![item.into()])
                }
            }
        )*
    };
}

impl_single!(
    usize,
    RangeFrom<usize>,
    Range<usize>,
    RangeTo<usize>,
    RangeToInclusive<usize>,
    RangeInclusive<usize>
);

macro_rules! impl_arrlike {
    ($($item: ty),*) => {
        $(
            impl From<&'_ [$item]> for Extents {
                fn from(items: &[$item]) -> Self {
                    Self::Extent(items.iter().cloned().map(Extent::from).collect())
                }
            }

            impl From<Vec<$item>> for Extents {
                fn from(items: Vec<$item>) -> Self {
                    Self::Extent(items.into_iter().map(Extent::from).collect())
                }
            }

            impl<const N: usize> From<[$item; N]> for Extents {
                fn from(items: [$item; N]) -> Self {
                    Self::Extent(items.into_iter().map(Extent::from).collect())
                }
            }
        )*
    };
}

impl_arrlike!(
    usize,
    RangeFrom<usize>,
    Range<usize>,
    RangeTo<usize>,
    RangeToInclusive<usize>,
    RangeInclusive<usize>,
    RangeFull,
    (usize, usize)
);

macro_rules! impl_tuple {
    () => ();

    ($head:ident, $($tail:ident,)*) => (
        #[allow(non_snake_case)]
        impl<$head, $($tail,)*> From<($head, $($tail,)*)> for Extents
            where
                $head: Into<Extent>,
                $($tail: Into<Extent>,)*
        {
            fn from(items: ($head, $($tail,)*)) -> Self {
                let ($head, $($tail,)*) = items;
                Self::Extent(vec![$head.into(), $($tail.into(),)*])
            }
        }

        impl_tuple! { $($tail,)* }
    )
}

impl_tuple! { T0, T1, T2, T3, T4, T5, T6, T7, }

impl<const N: usize> From<([usize; N], [usize; N])> for Extents {
    fn from((start, count): ([usize; N], [usize; N])) -> Self {
        Self::Extent(
            start
                .into_iter()
                .zip(count)
                .map(|(start, count)| Extent::SliceCount { start, count })
                .collect(),
        )
    }
}

impl TryFrom<(&[usize], &[usize])> for Extents {
    type Error = Error;

    fn try_from((start, count): (&[usize], &[usize])) -> Result<Self, Self::Error> {
        if start.len() != count.len() {
            return Err(Error::Extents(format!(
                "start has length {} but count has length {}",
                start.len(),
                count.len()
            )));
        }

        Ok(Self::Extent(
            start
                .iter()
                .zip(count)
                .map(|(&start, &count)| Extent::SliceCount { start, count })
                .collect(),
        ))
    }
}

mod ndarray_impl {
    use super::*;
    use ndarray::{Dimension, SliceInfo, SliceInfoElem};

    impl<T, Din: Dimension, Dout: Dimension> TryFrom<&'_ SliceInfo<T, Din, Dout>> for Extents
    where
        T: AsRef<[SliceInfoElem]>,
    {
        type Error = Error;

        fn try_from(slice: &SliceInfo<T, Din, Dout>) -> Result<Self, Self::Error> {
            let slice: &[SliceInfoElem] = slice.as_ref();
            let negative = |v: isize| Error::Extents(format!("negative index {v}"));

            Ok(slice
                .iter()
                .map(|&s| match s {
                    SliceInfoElem::Slice { start, end, step } => {
                        let start = usize::try_from(start).map_err(|_| negative(start))?;
                        if step != 1 {
                            Err(Error::Extents("strides are not supported".into()))
                        } else if let Some(end) = end {
                            let end = usize::try_from(end).map_err(|_| negative(end))?;
                            Ok(Extent::SliceEnd { start, end })
                        } else {
                            Ok(Extent::Slice { start })
                        }
                    }
                    SliceInfoElem::Index(index) => usize::try_from(index)
                        .map(Extent::Index)
                        .map_err(|_| negative(index)),
                    SliceInfoElem::NewAxis => {
                        Err(Error::Extents("can't add new axis when reading".into()))
                    }
                })
                .collect::<Result<Vec<Extent>, Error>>()?
                .into())
        }
    }

    impl<T, Din: Dimension, Dout: Dimension> TryFrom<SliceInfo<T, Din, Dout>> for Extents
    where
        T: AsRef<[SliceInfoElem]>,
    {
        type Error = Error;

        fn try_from(slice: SliceInfo<T, Din, Dout>) -> Result<Self, Self::Error> {
            Self::try_from(&slice)
        }
    }
}

/// A resolved hyperslab: where to start, how many along each dimension and the shape of the
/// result (axes selected by an index are removed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub start: Vec<usize>,
    pub count: Vec<usize>,
    pub shape: Vec<usize>,
}

impl Selection {
    pub fn size(&self) -> usize {
        self.count.iter().product()
    }
}

impl Extent {
    /// Start and count within a dimension of length `len`, and whether the axis is kept.
    fn resolve(&self, len: usize) -> Result<(usize, usize, bool), Error> {
        let (start, count, keep) = match *self {
            Self::Index(idx) => (idx, 1, false),
            Self::Slice { start } => (start, len.saturating_sub(start), true),
            Self::SliceEnd { start, end } => (start, end.saturating_sub(start), true),
            Self::SliceCount { start, count } => (start, count, true),
        };

        let inside = if keep {
            start
                .checked_add(count)
                .is_some_and(|end| start <= len && end <= len)
        } else {
            start < len
        };

        if inside {
            Ok((start, count, keep))
        } else {
            Err(Error::Extents(format!(
                "{self:?} is out of bounds for dimension of length {len}"
            )))
        }
    }
}

impl Extents {
    /// Resolve against the shape of a variable.
    pub fn resolve(&self, dims: &[usize]) -> Result<Selection, Error> {
        match self {
            Extents::All => Ok(Selection {
                start: vec![0; dims.len()],
                count: dims.to_vec(),
                shape: dims.to_vec(),
            }),
            Extents::Extent(extents) => {
                if extents.len() != dims.len() {
                    return Err(Error::Extents(format!(
                        "extents had length {} but the variable has {} dimensions",
                        extents.len(),
                        dims.len(),
                    )));
                }

                let mut sel = Selection {
                    start: Vec::with_capacity(dims.len()),
                    count: Vec::with_capacity(dims.len()),
                    shape: Vec::with_capacity(dims.len()),
                };

                for (e, &len) in extents.iter().zip(dims) {
                    let (start, count, keep) = e.resolve(len)?;
                    sel.start.push(start);
                    sel.count.push(count);
                    if keep {
                        sel.shape.push(count);
                    }
                }

                Ok(sel)
            }
        }
    }
}
