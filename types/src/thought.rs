use crate::{Point, ThoughtId};

/// User-assigned bucket for a thought.
///
/// Assigned only by an explicit drop (or equivalent update), never from the
/// advisory [`Hint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    Unassigned,
    Keep,
    LetGo,
}

impl Category {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unassigned => "Unassigned",
            Self::Keep => "Keep",
            Self::LetGo => "Let Go",
        }
    }
}

/// Non-binding suggested category derived from keyword heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hint {
    #[default]
    None,
    Keep,
    LetGo,
}

/// A single captured idea.
#[derive(Debug, Clone)]
pub struct Thought {
    pub id: ThoughtId,
    /// Trimmed thought content; never empty.
    pub text: String,
    pub category: Category,
    pub hint: Hint,
    /// Top-left cell of the rendered bubble. Random at creation, then moved
    /// only by drags.
    pub position: Point,
}

impl Thought {
    #[must_use]
    pub fn new(id: ThoughtId, text: String, hint: Hint, position: Point) -> Self {
        Self {
            id,
            text,
            category: Category::Unassigned,
            hint,
            position,
        }
    }
}
