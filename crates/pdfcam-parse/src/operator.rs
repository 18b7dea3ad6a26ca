//! Line-oriented operator classifier.
//!
//! Each input line is tested against an ordered table of patterns; the first
//! pattern that matches decides the [`Operator`]. Lines matching nothing are
//! ignored by the interpreter. Operands are returned untransformed.

use std::sync::LazyLock;

use pdfcam_core::{Color, FillRule};
use regex::{Captures, Regex};

/// Number syntax accepted for operands (`12`, `-3.5`, `.25`, `+1.`).
const NUM: &str = r"([-+]?(?:\d+\.?\d*|\.\d+))";

/// A recognised content stream operator with its operands.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    /// `r g b RG`
    StrokeColor(Color),
    /// `r g b rg`
    FillColor(Color),
    /// `[q] a b c d e f cm`
    Transform { save: bool, matrix: [f64; 6] },
    /// `q`
    Save,
    /// `Q`
    Restore,
    /// `x y m`
    MoveTo { x: f64, y: f64 },
    /// `x y l`
    LineTo { x: f64, y: f64 },
    /// `x1 y1 x2 y2 x3 y3 c`
    CurveTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
    },
    /// `x2 y2 x3 y3 v`
    CurveToV { x2: f64, y2: f64, x3: f64, y3: f64 },
    /// `x1 y1 x3 y3 y`
    CurveToY { x1: f64, y1: f64, x3: f64, y3: f64 },
    /// `x y w h re`
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// `W`, `W*`, optionally followed by `n`
    Clip,
    /// `h`
    ClosePath,
    /// `w`
    LineWidth(f64),
    /// `n`
    EndPath,
    /// `S`
    Stroke,
    /// `s`
    CloseAndStroke,
    /// `f`, `F`, `f*`
    Fill(FillRule),
    /// `B`, `B*`
    FillAndStroke(FillRule),
    /// `b`, `b*`
    CloseFillAndStroke(FillRule),
}

/// Operator forms in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    StrokeColor,
    FillColor,
    Transform,
    Save,
    Restore,
    MoveTo,
    LineTo,
    CurveTo,
    CurveToV,
    CurveToY,
    Rectangle,
    Clip,
    ClosePath,
    LineWidth,
    EndPath,
    Stroke,
    CloseAndStroke,
    Fill,
    FillAndStroke,
    CloseFillAndStroke,
}

impl OperatorKind {
    /// Every kind, highest priority first.
    pub const PRIORITY: [OperatorKind; 20] = [
        OperatorKind::StrokeColor,
        OperatorKind::FillColor,
        OperatorKind::Transform,
        OperatorKind::Save,
        OperatorKind::Restore,
        OperatorKind::MoveTo,
        OperatorKind::LineTo,
        OperatorKind::CurveTo,
        OperatorKind::CurveToV,
        OperatorKind::CurveToY,
        OperatorKind::Rectangle,
        OperatorKind::Clip,
        OperatorKind::ClosePath,
        OperatorKind::LineWidth,
        OperatorKind::EndPath,
        OperatorKind::Stroke,
        OperatorKind::CloseAndStroke,
        OperatorKind::Fill,
        OperatorKind::FillAndStroke,
        OperatorKind::CloseFillAndStroke,
    ];

    fn pattern(self) -> String {
        let n = |count: usize| vec![NUM; count].join(r"\s+");
        match self {
            OperatorKind::StrokeColor => format!(r"^\s*{}\s+RG\s*$", n(3)),
            OperatorKind::FillColor => format!(r"^\s*{}\s+rg\s*$", n(3)),
            OperatorKind::Transform => format!(r"^\s*(q\s+)?{}\s+cm\s*$", n(6)),
            OperatorKind::Save => r"^\s*q\s*$".to_string(),
            OperatorKind::Restore => r"(?:^|\s)Q(?:\s|$)".to_string(),
            OperatorKind::MoveTo => format!(r"^\s*{}\s+m\s*$", n(2)),
            OperatorKind::LineTo => format!(r"^\s*{}\s+l\s*$", n(2)),
            OperatorKind::CurveTo => format!(r"^\s*{}\s+c\s*$", n(6)),
            OperatorKind::CurveToV => format!(r"^\s*{}\s+v\s*$", n(4)),
            OperatorKind::CurveToY => format!(r"^\s*{}\s+y\s*$", n(4)),
            OperatorKind::Rectangle => format!(r"^\s*{}\s+re\s*$", n(4)),
            OperatorKind::Clip => r"^\s*W\*?(?:\s+n)?\s*$".to_string(),
            OperatorKind::ClosePath => r"^\s*h\s*$".to_string(),
            OperatorKind::LineWidth => format!(r"^\s*{NUM}\s+w\s*$"),
            OperatorKind::EndPath => r"^\s*n\s*$".to_string(),
            OperatorKind::Stroke => r"^\s*S\s*$".to_string(),
            OperatorKind::CloseAndStroke => r"^\s*s\s*$".to_string(),
            OperatorKind::Fill => r"^\s*(f\*?|F)\s*$".to_string(),
            OperatorKind::FillAndStroke => r"^\s*B(\*)?\s*$".to_string(),
            OperatorKind::CloseFillAndStroke => r"^\s*b(\*)?\s*$".to_string(),
        }
    }

    /// Decode the captures of this kind's pattern.
    fn build(self, caps: &Captures<'_>) -> Option<Operator> {
        let num = |i: usize| -> Option<f64> { caps.get(i)?.as_str().parse().ok() };
        let even_odd = |i: usize| {
            if caps.get(i).is_some_and(|m| m.as_str().ends_with('*')) {
                FillRule::EvenOdd
            } else {
                FillRule::NonZeroWinding
            }
        };
        let op = match self {
            OperatorKind::StrokeColor => Operator::StrokeColor(Color::new(num(1)?, num(2)?, num(3)?)),
            OperatorKind::FillColor => Operator::FillColor(Color::new(num(1)?, num(2)?, num(3)?)),
            OperatorKind::Transform => Operator::Transform {
                save: caps.get(1).is_some(),
                matrix: [num(2)?, num(3)?, num(4)?, num(5)?, num(6)?, num(7)?],
            },
            OperatorKind::Save => Operator::Save,
            OperatorKind::Restore => Operator::Restore,
            OperatorKind::MoveTo => Operator::MoveTo {
                x: num(1)?,
                y: num(2)?,
            },
            OperatorKind::LineTo => Operator::LineTo {
                x: num(1)?,
                y: num(2)?,
            },
            OperatorKind::CurveTo => Operator::CurveTo {
                x1: num(1)?,
                y1: num(2)?,
                x2: num(3)?,
                y2: num(4)?,
                x3: num(5)?,
                y3: num(6)?,
            },
            OperatorKind::CurveToV => Operator::CurveToV {
                x2: num(1)?,
                y2: num(2)?,
                x3: num(3)?,
                y3: num(4)?,
            },
            OperatorKind::CurveToY => Operator::CurveToY {
                x1: num(1)?,
                y1: num(2)?,
                x3: num(3)?,
                y3: num(4)?,
            },
            OperatorKind::Rectangle => Operator::Rectangle {
                x: num(1)?,
                y: num(2)?,
                width: num(3)?,
                height: num(4)?,
            },
            OperatorKind::Clip => Operator::Clip,
            OperatorKind::ClosePath => Operator::ClosePath,
            OperatorKind::LineWidth => Operator::LineWidth(num(1)?),
            OperatorKind::EndPath => Operator::EndPath,
            OperatorKind::Stroke => Operator::Stroke,
            OperatorKind::CloseAndStroke => Operator::CloseAndStroke,
            OperatorKind::Fill => Operator::Fill(even_odd(1)),
            OperatorKind::FillAndStroke => Operator::FillAndStroke(even_odd(1)),
            OperatorKind::CloseFillAndStroke => Operator::CloseFillAndStroke(even_odd(1)),
        };
        Some(op)
    }
}

static RULES: LazyLock<Vec<(OperatorKind, Regex)>> = LazyLock::new(|| {
    OperatorKind::PRIORITY
        .iter()
        .map(|&kind| {
            let re = Regex::new(&kind.pattern()).expect("operator patterns are valid regexes");
            (kind, re)
        })
        .collect()
});

/// Classify one content stream line.
///
/// Returns `None` for blank lines and operators outside the supported set.
pub fn classify_line(line: &str) -> Option<Operator> {
    if line.trim().is_empty() {
        return None;
    }
    RULES
        .iter()
        .find_map(|(kind, re)| re.captures(line).map(|caps| (*kind, caps)))
        .and_then(|(kind, caps)| kind.build(&caps))
}
