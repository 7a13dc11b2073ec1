//! Courses
//!
//! A course is one horizontal row of boards. The [`CoursePacker`] walks the
//! stud spans left to right, merging neighbouring spans into a single piece
//! for as long as the merged length stays below the longest board in the
//! pool, and cuts each merged piece through a [`CutResolver`].

use smallvec::SmallVec;

use crate::{
    cuts::{Cut, CutError, CutResolver},
    lengths::Length,
};

/// An ordered row of cuts covering the full wall width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Course {
    cuts: SmallVec<[Cut; 8]>,
}

impl Course {
    /// Create an empty course.
    pub fn new() -> Self {
        Course::default()
    }

    /// The cuts in this course, left to right.
    pub fn cuts(&self) -> &[Cut] {
        &self.cuts
    }

    /// Iterate over the cuts, left to right.
    pub fn iter(&self) -> impl Iterator<Item = &Cut> {
        self.cuts.iter()
    }

    /// Total installed length of the course.
    pub fn covered_length(&self) -> Length {
        self.cuts.iter().map(Cut::length).sum()
    }

    /// Number of cuts in the course.
    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    /// Whether the course has no cuts yet.
    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    fn push(&mut self, cut: Cut) {
        self.cuts.push(cut);
    }
}

impl<'a> IntoIterator for &'a Course {
    type Item = &'a Cut;
    type IntoIter = std::slice::Iter<'a, Cut>;

    fn into_iter(self) -> Self::IntoIter {
        self.cuts.iter()
    }
}

/// Where the packer is within a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PackState {
    /// Start a fresh piece against the current longest board.
    Open,

    /// Absorbing spans into `target` while they stay under `longest`.
    Accumulating { target: Length, longest: Length },

    /// `target` is full. Cut it, then continue with `carry` as the new piece.
    Splitting { target: Length, carry: Length },

    /// Cut `target`, then open a new piece if spans remain.
    Closing { target: Length },

    /// Every span has been covered.
    Done,
}

/// Greedy single-pass packer for one course.
#[derive(Debug, Clone, Copy)]
pub struct CoursePacker<'s> {
    spans: &'s [Length],
}

impl<'s> CoursePacker<'s> {
    /// Create a packer over `spans`, left to right.
    pub fn new(spans: &'s [Length]) -> Self {
        CoursePacker { spans }
    }

    /// Pack a new course.
    ///
    /// # Errors
    ///
    /// Returns a [`CutError`] if a piece cannot be cut.
    pub fn pack(&self, resolver: &mut CutResolver<'_>) -> Result<Course, CutError> {
        let mut course = Course::new();

        self.pack_into(resolver, &mut course)?;

        Ok(course)
    }

    /// Pack spans into `course`, appending each cut as soon as it is made.
    ///
    /// On error `course` holds the cuts made before the failure.
    ///
    /// # Errors
    ///
    /// Returns a [`CutError`] if a piece cannot be cut.
    pub fn pack_into(
        &self,
        resolver: &mut CutResolver<'_>,
        course: &mut Course,
    ) -> Result<(), CutError> {
        let mut spans = self.spans.iter().copied().peekable();
        let mut state = PackState::Open;

        loop {
            state = match state {
                PackState::Open => {
                    if spans.peek().is_some() {
                        PackState::Accumulating {
                            target: Length::ZERO,
                            longest: resolver.longest()?,
                        }
                    } else {
                        PackState::Done
                    }
                }
                PackState::Accumulating { target, longest } => {
                    if target >= longest {
                        PackState::Closing { target }
                    } else {
                        match spans.next() {
                            None => PackState::Closing { target },
                            Some(span) if target + span < longest => PackState::Accumulating {
                                target: target + span,
                                longest,
                            },
                            // Nothing accumulated yet, so the span stands alone.
                            Some(span) if target == Length::ZERO => PackState::Accumulating {
                                target: span,
                                longest,
                            },
                            Some(span) => PackState::Splitting {
                                target,
                                carry: span,
                            },
                        }
                    }
                }
                PackState::Splitting { target, carry } => {
                    course.push(resolver.resolve(target)?);

                    PackState::Accumulating {
                        target: carry,
                        longest: resolver.longest()?,
                    }
                }
                PackState::Closing { target } => {
                    course.push(resolver.resolve(target)?);

                    PackState::Open
                }
                PackState::Done => return Ok(()),
            };
        }
    }
}
