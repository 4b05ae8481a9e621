use std::fmt;

use clap::ValueEnum;

/// How the curve between samples is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InterpKind {
    /// Value of the closest sample; ties go to the lower one.
    Nearest,
    /// Value of the previous sample (order-0 step).
    #[value(name = "zero")]
    ZeroOrderHold,
    /// Order-1 spline.
    Linear,
    /// Order-2 spline.
    Quadratic,
    /// Order-3 spline.
    #[default]
    Cubic,
}

impl InterpKind {
    /// Polynomial order of the pieces.  Both step kinds are order 0.
    pub fn order(self) -> usize {
        match self {
            InterpKind::Nearest | InterpKind::ZeroOrderHold => 0,
            InterpKind::Linear => 1,
            InterpKind::Quadratic => 2,
            InterpKind::Cubic => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InterpKind::Nearest => "nearest",
            InterpKind::ZeroOrderHold => "zero",
            InterpKind::Linear => "linear",
            InterpKind::Quadratic => "quadratic",
            InterpKind::Cubic => "cubic",
        }
    }
}

impl fmt::Display for InterpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
