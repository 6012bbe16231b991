//! Abstract syntax tree definitions for JSONPath expressions
//!
//! Copyright (c) 2025 jsonmorph contributors
//! Licensed under MIT OR Apache-2.0

use std::fmt;

/// A parsed JSONPath expression: the implicit root followed by a selector chain
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub selectors: Vec<Selector>,
}

/// Individual selector in a JSONPath expression
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Child property selector (`.name` or `['name']`)
    Child(String),
    /// Array index selector (`[2]`, `[-1]`)
    Index(i64),
    /// Array slice selector (`[start:end:step]`)
    Slice(SliceSelector),
    /// Wildcard selector (`*`, `.*`, `[*]`)
    Wildcard,
    /// Recursive descent (`..`), yields the node and all of its descendants
    RecursiveDescent,
    /// Union selector (`[0,1]`, `['a','b']`)
    Union(Vec<Selector>),
    /// Filter selector (`[?(...)]`)
    Filter(FilterExpression),
}

/// Array slice bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceSelector {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub step: i64,
}

/// Filter expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    /// Current node reference (@)
    Current,
    /// Root reference ($)
    Root,
    /// Property access (@.property)
    Property {
        base: Box<FilterExpression>,
        property: String,
    },
    /// Index access (@[index])
    Index {
        base: Box<FilterExpression>,
        index: i64,
    },
    /// Literal value
    Literal(FilterLiteral),
    /// Binary operation
    Binary {
        left: Box<FilterExpression>,
        operator: BinaryOperator,
        right: Box<FilterExpression>,
    },
    /// Unary operation
    Unary {
        operator: UnaryOperator,
        operand: Box<FilterExpression>,
    },
    /// Function call
    Function {
        function: FilterFunction,
        args: Vec<FilterExpression>,
    },
}

/// Filter literal values
#[derive(Debug, Clone, PartialEq)]
pub enum FilterLiteral {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

/// Binary operators for filter expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
    /// Regular expression match (=~)
    RegexMatch,
    /// Membership test (in)
    In,
}

/// Unary operators for filter expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Negate,
}

/// Built-in filter functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFunction {
    /// length() of a string, array or object
    Length,
    /// type() name of a value
    Type,
}

impl FilterFunction {
    /// Look up a built-in function by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "length" | "size" => Some(Self::Length),
            "type" => Some(Self::Type),
            _ => None,
        }
    }
}

impl Expression {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for selector in &self.selectors {
            write!(f, "{}", selector)?;
        }
        Ok(())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Child(name) => {
                if name.chars().all(|c| c.is_alphanumeric() || c == '_') && !name.is_empty() {
                    write!(f, ".{}", name)
                } else {
                    write!(f, "['{}']", name.replace('\'', "\\'"))
                }
            }
            Selector::Index(index) => write!(f, "[{}]", index),
            Selector::Slice(slice) => write!(f, "{}", slice),
            Selector::Wildcard => write!(f, "[*]"),
            Selector::RecursiveDescent => write!(f, ".."),
            Selector::Union(selectors) => {
                write!(f, "[")?;
                for (i, selector) in selectors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    match selector {
                        Selector::Child(name) => write!(f, "'{}'", name)?,
                        Selector::Index(index) => write!(f, "{}", index)?,
                        Selector::Slice(slice) => {
                            let rendered = slice.to_string();
                            write!(f, "{}", &rendered[1..rendered.len() - 1])?
                        }
                        other => write!(f, "{}", other)?,
                    }
                }
                write!(f, "]")
            }
            Selector::Filter(filter) => write!(f, "[?({})]", filter),
        }
    }
}

impl fmt::Display for SliceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        if let Some(start) = self.start { write!(f, "{}", start)?; }
        write!(f, ":")?;
        if let Some(end) = self.end { write!(f, "{}", end)?; }
        if self.step != 1 { write!(f, ":{}", self.step)?; }
        write!(f, "]")
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpression::Current => write!(f, "@"),
            FilterExpression::Root => write!(f, "$"),
            FilterExpression::Property { base, property } => write!(f, "{}.{}", base, property),
            FilterExpression::Index { base, index } => write!(f, "{}[{}]", base, index),
            FilterExpression::Literal(lit) => write!(f, "{}", lit),
            FilterExpression::Binary { left, operator, right } => {
                write!(f, "{} {} {}", left, operator, right)
            }
            FilterExpression::Unary { operator, operand } => write!(f, "{}{}", operator, operand),
            FilterExpression::Function { function, args } => {
                write!(f, "{}(", function)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 { write!(f, ",")?; }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for FilterLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterLiteral::String(s) => write!(f, "'{}'", s),
            FilterLiteral::Number(n) => write!(f, "{}", n),
            FilterLiteral::Boolean(b) => write!(f, "{}", b),
            FilterLiteral::Null => write!(f, "null"),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::RegexMatch => "=~",
            BinaryOperator::In => "in",
        };
        write!(f, "{}", symbol)
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOperator::Not => write!(f, "!"),
            UnaryOperator::Negate => write!(f, "-"),
        }
    }
}

impl fmt::Display for FilterFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterFunction::Length => write!(f, "length"),
            FilterFunction::Type => write!(f, "type"),
        }
    }
}
