//! Filter expression evaluation for JSONPath
//!
//! Filters see every child of the node they are applied to. A property or
//! index that does not exist evaluates to "nothing" rather than failing, so
//! `[?(@.isbn)]` is an existence test and comparisons against missing
//! members are simply false.
//!
//! Copyright (c) 2025 jsonmorph contributors
//! Licensed under MIT OR Apache-2.0

use super::ast::*;
use super::error::JSONPathError;
use super::selector::{children, SelectorExecutor};
use regex::Regex;
use serde_json::{Number, Value};
use std::borrow::Cow;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;

type FilterResult<T> = std::result::Result<T, JSONPathError>;

/// An evaluated operand: borrowed from the document, computed, or missing
type Operand<'a> = Option<Cow<'a, Value>>;

/// Filter executor for `[?(...)]` selectors
pub struct FilterExecutor {
    filter: FilterExpression,
    /// Compiled `=~` patterns, keyed by source text
    patterns: RefCell<HashMap<String, Regex>>,
}

impl FilterExecutor {
    pub fn new(filter: FilterExpression) -> Self {
        Self {
            filter,
            patterns: RefCell::new(HashMap::new()),
        }
    }

    /// Evaluate the filter with `current` bound to `@`, returning its truthiness
    pub fn matches(&self, current: &Value, root: &Value) -> FilterResult<bool> {
        let result = self.evaluate(&self.filter, current, root)?;
        Ok(is_truthy(result.as_deref()))
    }

    fn evaluate<'a>(
        &self,
        filter: &FilterExpression,
        current: &'a Value,
        root: &'a Value,
    ) -> FilterResult<Operand<'a>> {
        match filter {
            FilterExpression::Current => Ok(Some(Cow::Borrowed(current))),
            FilterExpression::Root => Ok(Some(Cow::Borrowed(root))),
            FilterExpression::Property { base, property } => {
                let base_value = self.evaluate(base, current, root)?;
                Ok(base_value.and_then(|value| get_property(value, property)))
            }
            FilterExpression::Index { base, index } => {
                let base_value = self.evaluate(base, current, root)?;
                Ok(base_value.and_then(|value| get_index(value, *index)))
            }
            FilterExpression::Literal(literal) => Ok(Some(Cow::Owned(literal_to_value(literal)))),
            FilterExpression::Binary { left, operator, right } => {
                self.evaluate_binary(left, *operator, right, current, root)
            }
            FilterExpression::Unary { operator, operand } => {
                let value = self.evaluate(operand, current, root)?;
                match operator {
                    UnaryOperator::Not => Ok(Some(Cow::Owned(Value::Bool(!is_truthy(value.as_deref()))))),
                    UnaryOperator::Negate => negate(value.as_deref()).map(|v| Some(Cow::Owned(v))),
                }
            }
            FilterExpression::Function { function, args } => {
                let target = match args.first() {
                    Some(arg) => self.evaluate(arg, current, root)?,
                    None => Some(Cow::Borrowed(current)),
                };
                Ok(apply_function(*function, target.as_deref()).map(Cow::Owned))
            }
        }
    }

    /// Evaluate a binary operation, short-circuiting `&&` and `||`
    fn evaluate_binary<'a>(
        &self,
        left: &FilterExpression,
        operator: BinaryOperator,
        right: &FilterExpression,
        current: &'a Value,
        root: &'a Value,
    ) -> FilterResult<Operand<'a>> {
        let left_val = self.evaluate(left, current, root)?;

        let result = match operator {
            BinaryOperator::And => {
                is_truthy(left_val.as_deref()) && is_truthy(self.evaluate(right, current, root)?.as_deref())
            }
            BinaryOperator::Or => {
                is_truthy(left_val.as_deref()) || is_truthy(self.evaluate(right, current, root)?.as_deref())
            }
            _ => {
                let right_val = self.evaluate(right, current, root)?;
                let (l, r) = (left_val.as_deref(), right_val.as_deref());
                match operator {
                    BinaryOperator::Equal => values_equal(l, r),
                    BinaryOperator::NotEqual => !values_equal(l, r),
                    BinaryOperator::LessThan => compare(l, r, |ord| ord == Ordering::Less),
                    BinaryOperator::LessThanOrEqual => compare(l, r, |ord| ord != Ordering::Greater),
                    BinaryOperator::GreaterThan => compare(l, r, |ord| ord == Ordering::Greater),
                    BinaryOperator::GreaterThanOrEqual => compare(l, r, |ord| ord != Ordering::Less),
                    BinaryOperator::RegexMatch => self.regex_match(l, r)?,
                    BinaryOperator::In => value_in(l, r),
                    BinaryOperator::And | BinaryOperator::Or => false,
                }
            }
        };

        Ok(Some(Cow::Owned(Value::Bool(result))))
    }

    /// `text =~ 'pattern'`; a non-string subject never matches
    fn regex_match(&self, left: Option<&Value>, right: Option<&Value>) -> FilterResult<bool> {
        let pattern = match right {
            Some(Value::String(pattern)) => pattern,
            other => {
                return Err(JSONPathError::type_mismatch(
                    "string",
                    value_type_name(other),
                    "regex match pattern",
                ))
            }
        };
        let Some(Value::String(text)) = left else {
            return Ok(false);
        };

        let mut patterns = self.patterns.borrow_mut();
        if let Some(regex) = patterns.get(pattern) {
            return Ok(regex.is_match(text));
        }
        let regex = Regex::new(pattern).map_err(|e| {
            JSONPathError::filter_evaluation(format!("Invalid regular expression: {}", e), self.filter.to_string())
        })?;
        let matched = regex.is_match(text);
        patterns.insert(pattern.clone(), regex);
        Ok(matched)
    }
}

impl SelectorExecutor for FilterExecutor {
    fn execute<'a>(&self, inputs: Vec<&'a Value>, root: &'a Value) -> FilterResult<Vec<&'a Value>> {
        let mut results = Vec::new();
        for input in inputs {
            for child in children(input) {
                if self.matches(child, root)? {
                    results.push(child);
                }
            }
        }
        Ok(results)
    }
}

fn get_property<'a>(value: Cow<'a, Value>, property: &str) -> Operand<'a> {
    match value {
        Cow::Borrowed(Value::Object(map)) => map.get(property).map(Cow::Borrowed),
        Cow::Owned(Value::Object(mut map)) => map.remove(property).map(Cow::Owned),
        _ => None,
    }
}

fn get_index(value: Cow<'_, Value>, index: i64) -> Operand<'_> {
    let len = match &*value {
        Value::Array(items) => items.len(),
        _ => return None,
    };
    let position = normalize_index(index, len)?;
    match value {
        Cow::Borrowed(Value::Array(items)) => items.get(position).map(Cow::Borrowed),
        Cow::Owned(Value::Array(mut items)) => Some(Cow::Owned(items.swap_remove(position))),
        _ => None,
    }
}

/// Resolve a possibly negative index against an array length
pub(crate) fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let resolved = if index < 0 { len + index } else { index };
    (0..len).contains(&resolved).then_some(resolved as usize)
}

fn literal_to_value(literal: &FilterLiteral) -> Value {
    match literal {
        FilterLiteral::String(s) => Value::String(s.clone()),
        FilterLiteral::Number(n) => number_value(*n),
        FilterLiteral::Boolean(b) => Value::Bool(*b),
        FilterLiteral::Null => Value::Null,
    }
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

fn negate(value: Option<&Value>) -> FilterResult<Value> {
    match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => Ok(Value::Number(Number::from(-i))),
            None => Ok(number_value(-n.as_f64().unwrap_or(0.0))),
        },
        other => Err(JSONPathError::type_mismatch("number", value_type_name(other), "negation operator")),
    }
}

fn apply_function(function: FilterFunction, target: Option<&Value>) -> Option<Value> {
    match function {
        FilterFunction::Length => {
            let length = match target? {
                Value::Array(items) => items.len(),
                Value::Object(map) => map.len(),
                Value::String(s) => s.chars().count(),
                _ => return None,
            };
            Some(Value::Number(Number::from(length)))
        }
        FilterFunction::Type => target.map(|value| Value::String(value_type_name(Some(value)).to_string())),
    }
}

/// Truthiness used by filters: missing, null, false, zero and "" are false
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn values_equal(left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a.as_f64() == b.as_f64(),
        (a, b) => a == b,
    }
}

/// Ordered comparison; operands of different types never compare
fn compare<F>(left: Option<&Value>, right: Option<&Value>, predicate: F) -> bool
where
    F: Fn(Ordering) -> bool,
{
    let ordering = match (left, right) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a.as_f64().zip(b.as_f64()).and_then(|(a, b)| a.partial_cmp(&b)),
        (Some(Value::String(a)), Some(Value::String(b))) => Some(a.cmp(b)),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => Some(a.cmp(b)),
        _ => None,
    };
    ordering.is_some_and(predicate)
}

fn value_in(left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (_, Some(Value::Array(items))) => items.iter().any(|item| values_equal(left, Some(item))),
        (Some(Value::String(needle)), Some(Value::String(haystack))) => haystack.contains(needle.as_str()),
        (Some(Value::String(key)), Some(Value::Object(map))) => map.contains_key(key),
        _ => false,
    }
}

pub(crate) fn value_type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}
