//! Syntax-node types for incant scripts.
//!
//! Every node carries a [`Span`] and nodes are immutable once parsed.
//! The tree is strictly nested and preserves source order; the
//! `Display` impl re-serializes any node to equivalent source text, so
//! `parse(format!("{node}"))` yields an equal tree.

use crate::Span;
use std::fmt;

/// A spanned syntax node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The closed set of node shapes. Evaluation matches exhaustively, so a
/// new node kind is a compile-time-checked change everywhere.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// `145`, `3.14e18`, `2w` — raw mantissa text plus optional
    /// power-of-ten exponent and time-unit suffix.
    NumberLiteral {
        value: String,
        power: Option<u32>,
        time_unit: Option<TimeUnit>,
    },
    /// `"a text string"` or `'quoted'`.
    StringLiteral(String),
    /// `true` / `false`.
    BoolLiteral(bool),
    /// `[expr, expr, ...]` — arbitrarily nested.
    ArrayExpression(Vec<Node>),
    /// A plain name whose meaning is resolved contextually.
    ProbableIdentifier(String),
    /// `$name` — the name is stored without the `$` prefix.
    VariableIdentifier(String),
    /// `@name(args...)` — parens mandatory even with zero args.
    HelperFunctionExpression { name: String, args: Vec<Node> },
    /// `target::method(args...)`.
    CallExpression {
        target: Box<Node>,
        method: String,
        args: Vec<Node>,
    },
    /// One command line.
    CommandExpression(CommandExpression),
}

/// `[module:]name arg arg ... --opt value ...`
#[derive(Debug, Clone, PartialEq)]
pub struct CommandExpression {
    /// Explicit module qualifier, if any.
    pub module: Option<String>,
    pub name: String,
    /// Positional arguments in source order.
    pub args: Vec<Node>,
    /// Named options in source order.
    pub opts: Vec<CommandOpt>,
}

impl CommandExpression {
    /// The option value node for `--name`, if present.
    pub fn opt(&self, name: &str) -> Option<&Node> {
        self.opts.iter().find(|o| o.name == name).map(|o| &o.value)
    }
}

/// A `--name value` option.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOpt {
    pub name: String,
    pub value: Node,
    pub span: Span,
}

/// Time-unit suffixes on number literals, with fixed multipliers in
/// seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    /// Multiplier in seconds.
    pub fn multiplier(self) -> i128 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 3_600,
            TimeUnit::Days => 86_400,
            TimeUnit::Weeks => 604_800,
            TimeUnit::Months => 2_592_000,
            TimeUnit::Years => 31_536_000,
        }
    }

    /// The literal suffix as written in source.
    pub fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
            TimeUnit::Weeks => "w",
            TimeUnit::Months => "mo",
            TimeUnit::Years => "y",
        }
    }

    /// Parse a suffix back into a unit.
    pub fn from_suffix(s: &str) -> Option<Self> {
        match s {
            "s" => Some(TimeUnit::Seconds),
            "m" => Some(TimeUnit::Minutes),
            "h" => Some(TimeUnit::Hours),
            "d" => Some(TimeUnit::Days),
            "w" => Some(TimeUnit::Weeks),
            "mo" => Some(TimeUnit::Months),
            "y" => Some(TimeUnit::Years),
            _ => None,
        }
    }
}

// ── Re-serialization ──────────────────────────────────────────────────

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::NumberLiteral {
                value,
                power,
                time_unit,
            } => {
                write!(f, "{value}")?;
                if let Some(p) = power {
                    write!(f, "e{p}")?;
                }
                if let Some(u) = time_unit {
                    write!(f, "{}", u.suffix())?;
                }
                Ok(())
            }
            NodeKind::StringLiteral(s) => write!(f, "\"{s}\""),
            NodeKind::BoolLiteral(b) => write!(f, "{b}"),
            NodeKind::ArrayExpression(elements) => {
                write!(f, "[")?;
                for (i, el) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{el}")?;
                }
                write!(f, "]")
            }
            NodeKind::ProbableIdentifier(name) => write!(f, "{name}"),
            NodeKind::VariableIdentifier(name) => write!(f, "${name}"),
            NodeKind::HelperFunctionExpression { name, args } => {
                write!(f, "@{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            NodeKind::CallExpression {
                target,
                method,
                args,
            } => {
                write!(f, "{target}::{method}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            NodeKind::CommandExpression(c) => write!(f, "{c}"),
        }
    }
}

impl fmt::Display for CommandExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(module) = &self.module {
            write!(f, "{module}:")?;
        }
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        for opt in &self.opts {
            write!(f, " --{} {}", opt.name, opt.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(kind: NodeKind) -> Node {
        Node::new(kind, Span::point(1, 1))
    }

    #[test]
    fn time_unit_multipliers() {
        assert_eq!(TimeUnit::Seconds.multiplier(), 1);
        assert_eq!(TimeUnit::Minutes.multiplier(), 60);
        assert_eq!(TimeUnit::Hours.multiplier(), 3_600);
        assert_eq!(TimeUnit::Days.multiplier(), 86_400);
        assert_eq!(TimeUnit::Years.multiplier(), 31_536_000);
    }

    #[test]
    fn time_unit_suffix_round_trip() {
        for unit in [
            TimeUnit::Seconds,
            TimeUnit::Minutes,
            TimeUnit::Hours,
            TimeUnit::Days,
            TimeUnit::Weeks,
            TimeUnit::Months,
            TimeUnit::Years,
        ] {
            assert_eq!(TimeUnit::from_suffix(unit.suffix()), Some(unit));
        }
        assert_eq!(TimeUnit::from_suffix("x"), None);
    }

    #[test]
    fn number_literal_display() {
        let n = node(NodeKind::NumberLiteral {
            value: "145".into(),
            power: Some(18),
            time_unit: Some(TimeUnit::Years),
        });
        assert_eq!(n.to_string(), "145e18y");
    }

    #[test]
    fn nested_array_display() {
        let inner = node(NodeKind::ArrayExpression(vec![node(
            NodeKind::NumberLiteral {
                value: "1".into(),
                power: None,
                time_unit: None,
            },
        )]));
        let outer = node(NodeKind::ArrayExpression(vec![
            node(NodeKind::StringLiteral("a".into())),
            inner,
        ]));
        assert_eq!(outer.to_string(), "[\"a\", [1]]");
    }

    #[test]
    fn command_display_with_module_and_opts() {
        let c = CommandExpression {
            module: Some("aragon".into()),
            name: "connect".into(),
            args: vec![node(NodeKind::ProbableIdentifier("mydao".into()))],
            opts: vec![CommandOpt {
                name: "context".into(),
                value: node(NodeKind::StringLiteral("main".into())),
                span: Span::point(1, 1),
            }],
        };
        assert_eq!(c.to_string(), "aragon:connect mydao --context \"main\"");
        assert!(c.opt("context").is_some());
        assert!(c.opt("missing").is_none());
    }
}
