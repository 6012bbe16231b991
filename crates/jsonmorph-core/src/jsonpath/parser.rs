//! JSONPath expression parser
//!
//! A recursive descent parser producing [`Expression`] trees. Filter
//! expressions follow the usual precedence: `||` < `&&` < equality/match
//! (`==`, `!=`, `=~`, `in`) < comparison < unary.
//!
//! Copyright (c) 2025 jsonmorph contributors
//! Licensed under MIT OR Apache-2.0

use super::ast::*;
use super::error::JSONPathError;

type ParseResult<T> = std::result::Result<T, JSONPathError>;

/// JSONPath expression parser
pub struct Parser<'a> {
    input: &'a str,
    /// Characters paired with their byte offsets
    chars: Vec<(usize, char)>,
    cursor: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input
    pub fn new(input: &'a str) -> ParseResult<Self> {
        if input.trim().is_empty() {
            return Err(JSONPathError::parse("Empty JSONPath expression", 0, input));
        }

        Ok(Self {
            input,
            chars: input.char_indices().collect(),
            cursor: 0,
        })
    }

    /// Parse the JSONPath expression into an AST
    pub fn parse(mut self) -> ParseResult<Expression> {
        self.skip_whitespace();
        if self.current_char() != Some('$') {
            return Err(self.syntax_error("JSONPath must start with $", &["$"]));
        }
        self.advance();

        let mut selectors: Vec<Selector> = Vec::new();
        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }
            let after_descent = matches!(selectors.last(), Some(Selector::RecursiveDescent));
            let selector = self.parse_selector(after_descent)?;
            selectors.push(selector);
        }

        if matches!(selectors.last(), Some(Selector::RecursiveDescent)) {
            return Err(self.syntax_error("Recursive descent must be followed by a selector", &["identifier", "*", "["]));
        }

        Ok(Expression::new(selectors))
    }

    fn parse_selector(&mut self, after_descent: bool) -> ParseResult<Selector> {
        match self.current_char() {
            Some('.') => self.parse_dot_selector(),
            Some('[') => self.parse_bracket_selector(),
            // `..name` and `..*` leave the name directly after the descent
            Some('*') if after_descent => {
                self.advance();
                Ok(Selector::Wildcard)
            }
            Some(ch) if after_descent && is_identifier_char(ch) => {
                Ok(Selector::Child(self.parse_identifier()?))
            }
            Some(_) => Err(self.syntax_error("Unexpected character in selector", &[".", "["])),
            None => Err(JSONPathError::parse("Unexpected end of input", self.position(), self.input)),
        }
    }

    /// Parse `.name`, `.*` or `..`
    fn parse_dot_selector(&mut self) -> ParseResult<Selector> {
        self.advance();

        match self.current_char() {
            Some('.') => {
                self.advance();
                Ok(Selector::RecursiveDescent)
            }
            Some('*') => {
                self.advance();
                Ok(Selector::Wildcard)
            }
            _ => Ok(Selector::Child(self.parse_identifier()?)),
        }
    }

    fn parse_bracket_selector(&mut self) -> ParseResult<Selector> {
        self.advance();
        self.skip_whitespace();

        let selector = match self.current_char() {
            Some('?') => {
                self.advance();
                let filter = self.parse_filter_expression()?;
                Selector::Filter(filter)
            }
            Some('*') => {
                self.advance();
                Selector::Wildcard
            }
            Some('\'') | Some('"') => {
                let mut names = vec![self.parse_quoted_string()?];
                while self.consume_separator() {
                    names.push(self.parse_quoted_string()?);
                }
                if names.len() == 1 {
                    Selector::Child(names.remove(0))
                } else {
                    Selector::Union(names.into_iter().map(Selector::Child).collect())
                }
            }
            _ => {
                let mut parts = vec![self.parse_index_or_slice()?];
                while self.consume_separator() {
                    parts.push(self.parse_index_or_slice()?);
                }
                if parts.len() == 1 {
                    parts.remove(0)
                } else {
                    Selector::Union(parts)
                }
            }
        };

        self.skip_whitespace();
        self.expect_char(']')?;
        Ok(selector)
    }

    fn consume_separator(&mut self) -> bool {
        self.skip_whitespace();
        if self.current_char() == Some(',') {
            self.advance();
            self.skip_whitespace();
            true
        } else {
            false
        }
    }

    /// Parse `n`, `-n` or `start:end:step` inside brackets
    fn parse_index_or_slice(&mut self) -> ParseResult<Selector> {
        self.skip_whitespace();
        let start = self.parse_optional_integer()?;
        self.skip_whitespace();

        if self.current_char() != Some(':') {
            return match start {
                Some(index) => Ok(Selector::Index(index)),
                None => Err(self.syntax_error(
                    "Invalid character in bracket selector",
                    &["digit", ":", "*", "'", "?"],
                )),
            };
        }

        self.advance();
        self.skip_whitespace();
        let end = self.parse_optional_integer()?;
        self.skip_whitespace();

        let mut step = 1;
        if self.current_char() == Some(':') {
            self.advance();
            self.skip_whitespace();
            step = self.parse_optional_integer()?.unwrap_or(1);
        }

        if step == 0 {
            return Err(JSONPathError::parse("Slice step cannot be zero", self.position(), self.input));
        }

        Ok(Selector::Slice(SliceSelector { start, end, step }))
    }

    fn parse_optional_integer(&mut self) -> ParseResult<Option<i64>> {
        let begin = self.position();
        let mut digits = String::new();

        if self.current_char() == Some('-') {
            digits.push('-');
            self.advance();
        }
        while let Some(ch) = self.current_char().filter(char::is_ascii_digit) {
            digits.push(ch);
            self.advance();
        }

        if digits.is_empty() {
            return Ok(None);
        }
        digits
            .parse()
            .map(Some)
            .map_err(|_| JSONPathError::parse(format!("Invalid array index: {}", digits), begin, self.input))
    }

    fn parse_filter_expression(&mut self) -> ParseResult<FilterExpression> {
        self.parse_logical_or()
    }

    fn parse_logical_or(&mut self) -> ParseResult<FilterExpression> {
        let mut expr = self.parse_logical_and()?;
        while self.match_operator("||") {
            let right = self.parse_logical_and()?;
            expr = binary(expr, BinaryOperator::Or, right);
        }
        Ok(expr)
    }

    fn parse_logical_and(&mut self) -> ParseResult<FilterExpression> {
        let mut expr = self.parse_equality()?;
        while self.match_operator("&&") {
            let right = self.parse_equality()?;
            expr = binary(expr, BinaryOperator::And, right);
        }
        Ok(expr)
    }

    fn parse_equality(&mut self) -> ParseResult<FilterExpression> {
        let mut expr = self.parse_comparison()?;

        loop {
            let operator = if self.match_operator("==") {
                BinaryOperator::Equal
            } else if self.match_operator("!=") {
                BinaryOperator::NotEqual
            } else if self.match_operator("=~") {
                BinaryOperator::RegexMatch
            } else if self.match_keyword("in") {
                BinaryOperator::In
            } else {
                break;
            };
            let right = self.parse_comparison()?;
            expr = binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn parse_comparison(&mut self) -> ParseResult<FilterExpression> {
        let mut expr = self.parse_unary()?;

        loop {
            let operator = if self.match_operator("<=") {
                BinaryOperator::LessThanOrEqual
            } else if self.match_operator(">=") {
                BinaryOperator::GreaterThanOrEqual
            } else if self.match_operator("<") {
                BinaryOperator::LessThan
            } else if self.match_operator(">") {
                BinaryOperator::GreaterThan
            } else {
                break;
            };
            let right = self.parse_unary()?;
            expr = binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn parse_unary(&mut self) -> ParseResult<FilterExpression> {
        self.skip_whitespace();

        if self.current_char() == Some('!') && self.peek_char() != Some('=') {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(FilterExpression::Unary {
                operator: UnaryOperator::Not,
                operand: Box::new(operand),
            });
        }

        if self.current_char() == Some('-') && !self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(FilterExpression::Unary {
                operator: UnaryOperator::Negate,
                operand: Box::new(operand),
            });
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> ParseResult<FilterExpression> {
        self.skip_whitespace();

        match self.current_char() {
            Some('(') => {
                self.advance();
                let expr = self.parse_filter_expression()?;
                self.skip_whitespace();
                self.expect_char(')')?;
                Ok(expr)
            }
            Some('@') => {
                self.advance();
                self.parse_path_expression(FilterExpression::Current)
            }
            Some('$') => {
                self.advance();
                self.parse_path_expression(FilterExpression::Root)
            }
            Some('\'') | Some('"') => {
                let value = self.parse_quoted_string()?;
                Ok(FilterExpression::Literal(FilterLiteral::String(value)))
            }
            Some(ch) if ch.is_ascii_digit() || ch == '-' => {
                let number = self.parse_number()?;
                Ok(FilterExpression::Literal(FilterLiteral::Number(number)))
            }
            Some(ch) if ch.is_alphabetic() => {
                let begin = self.position();
                let ident = self.parse_identifier()?;
                match ident.as_str() {
                    "true" => Ok(FilterExpression::Literal(FilterLiteral::Boolean(true))),
                    "false" => Ok(FilterExpression::Literal(FilterLiteral::Boolean(false))),
                    "null" => Ok(FilterExpression::Literal(FilterLiteral::Null)),
                    _ => {
                        let function = FilterFunction::from_name(&ident).ok_or_else(|| {
                            JSONPathError::parse(format!("Unknown identifier: {}", ident), begin, self.input)
                        })?;
                        self.skip_whitespace();
                        self.expect_char('(')?;
                        let args = self.parse_function_args()?;
                        self.expect_char(')')?;
                        Ok(FilterExpression::Function { function, args })
                    }
                }
            }
            Some(_) => Err(self.syntax_error(
                "Unexpected character in filter expression",
                &["@", "$", "'", "digit", "identifier", "("],
            )),
            None => Err(JSONPathError::parse(
                "Unexpected end of input in filter expression",
                self.position(),
                self.input,
            )),
        }
    }

    /// Parse `.property` and `[index]` chains after `@` or `$`
    fn parse_path_expression(&mut self, base: FilterExpression) -> ParseResult<FilterExpression> {
        let mut expr = base;

        loop {
            match self.current_char() {
                Some('.') => {
                    self.advance();
                    let property = self.parse_identifier()?;
                    expr = FilterExpression::Property { base: Box::new(expr), property };
                }
                Some('[') => {
                    self.advance();
                    self.skip_whitespace();
                    expr = if matches!(self.current_char(), Some('\'') | Some('"')) {
                        let property = self.parse_quoted_string()?;
                        FilterExpression::Property { base: Box::new(expr), property }
                    } else {
                        let index = self
                            .parse_optional_integer()?
                            .ok_or_else(|| self.syntax_error("Expected index", &["digit", "'"]))?;
                        FilterExpression::Index { base: Box::new(expr), index }
                    };
                    self.skip_whitespace();
                    self.expect_char(']')?;
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    fn parse_function_args(&mut self) -> ParseResult<Vec<FilterExpression>> {
        let mut args = Vec::new();

        self.skip_whitespace();
        if self.current_char() == Some(')') {
            return Ok(args);
        }

        loop {
            args.push(self.parse_filter_expression()?);
            if !self.consume_separator() {
                break;
            }
        }
        self.skip_whitespace();

        Ok(args)
    }

    fn parse_identifier(&mut self) -> ParseResult<String> {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char().filter(|c| is_identifier_char(*c)) {
            identifier.push(ch);
            self.advance();
        }

        if identifier.is_empty() {
            return Err(self.syntax_error("Expected identifier", &["letter, digit, _ or -"]));
        }
        Ok(identifier)
    }

    fn parse_quoted_string(&mut self) -> ParseResult<String> {
        let begin = self.position();
        let Some(quote_char) = self.current_char() else {
            return Err(JSONPathError::parse("Expected string literal", begin, self.input));
        };
        self.advance();

        let mut string = String::new();
        let mut escaped = false;

        while let Some(ch) = self.current_char() {
            self.advance();
            if escaped {
                match ch {
                    'n' => string.push('\n'),
                    'r' => string.push('\r'),
                    't' => string.push('\t'),
                    '\\' | '\'' | '"' => string.push(ch),
                    _ => {
                        string.push('\\');
                        string.push(ch);
                    }
                }
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote_char {
                return Ok(string);
            } else {
                string.push(ch);
            }
        }

        Err(JSONPathError::parse("Unterminated string literal", begin, self.input))
    }

    fn parse_number(&mut self) -> ParseResult<f64> {
        let begin = self.position();
        let mut number = String::new();

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }
        while let Some(ch) = self
            .current_char()
            .filter(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+'))
        {
            number.push(ch);
            self.advance();
        }

        number
            .parse()
            .map_err(|_| JSONPathError::parse(format!("Invalid number: {}", number), begin, self.input))
    }

    /// Match and consume a symbolic operator
    fn match_operator(&mut self, op: &str) -> bool {
        self.skip_whitespace();
        let matches = op
            .chars()
            .enumerate()
            .all(|(i, expected)| self.char_at(self.cursor + i) == Some(expected));
        if matches {
            self.cursor += op.chars().count();
        }
        matches
    }

    /// Match a word operator such as `in`, which must not run into an identifier
    fn match_keyword(&mut self, keyword: &str) -> bool {
        self.skip_whitespace();
        let len = keyword.chars().count();
        let boundary = self
            .char_at(self.cursor + len)
            .map_or(true, |c| !is_identifier_char(c));
        if boundary && self.match_operator(keyword) {
            return true;
        }
        false
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).map(|(_, c)| *c)
    }

    fn current_char(&self) -> Option<char> {
        self.char_at(self.cursor)
    }

    fn peek_char(&self) -> Option<char> {
        self.char_at(self.cursor + 1)
    }

    fn advance(&mut self) {
        if self.cursor < self.chars.len() {
            self.cursor += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.cursor >= self.chars.len()
    }

    /// Current byte offset in the input
    fn position(&self) -> usize {
        self.chars
            .get(self.cursor)
            .map_or(self.input.len(), |(offset, _)| *offset)
    }

    fn expect_char(&mut self, expected: char) -> ParseResult<()> {
        if self.current_char() == Some(expected) {
            self.advance();
            return Ok(());
        }
        let expected = expected.to_string();
        Err(self.syntax_error(format!("Expected '{}'", expected), &[expected.as_str()]))
    }

    fn syntax_error(&self, message: impl Into<String>, expected: &[&str]) -> JSONPathError {
        let found = self
            .current_char()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "EOF".to_string());
        JSONPathError::syntax(message, self.position(), self.input, expected, found)
    }
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '-'
}

fn binary(left: FilterExpression, operator: BinaryOperator, right: FilterExpression) -> FilterExpression {
    FilterExpression::Binary {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Expression {
        Parser::new(input).unwrap().parse().unwrap()
    }

    #[test]
    fn test_parse_root() {
        assert!(parse("$").selectors.is_empty());
    }

    #[test]
    fn test_parse_property_chain() {
        let expr = parse("$.src.items");
        assert_eq!(
            expr.selectors,
            vec![Selector::Child("src".to_string()), Selector::Child("items".to_string())]
        );
    }

    #[test]
    fn test_parse_array_index() {
        let expr = parse("$.animals[0].name");
        assert_eq!(expr.selectors[1], Selector::Index(0));
        assert_eq!(expr.selectors[2], Selector::Child("name".to_string()));
    }

    #[test]
    fn test_parse_negative_index() {
        assert_eq!(parse("$.books[-1]").selectors[1], Selector::Index(-1));
    }

    #[test]
    fn test_parse_slice() {
        let expr = parse("$.books[1:3]");
        assert_eq!(
            expr.selectors[1],
            Selector::Slice(SliceSelector { start: Some(1), end: Some(3), step: 1 })
        );
        let expr = parse("$.books[::2]");
        assert_eq!(
            expr.selectors[1],
            Selector::Slice(SliceSelector { start: None, end: None, step: 2 })
        );
    }

    #[test]
    fn test_parse_wildcards() {
        assert_eq!(parse("$.store.*").selectors[1], Selector::Wildcard);
        assert_eq!(parse("$.animals[*].name").selectors[1], Selector::Wildcard);
    }

    #[test]
    fn test_parse_recursive_descent() {
        let expr = parse("$.src..name");
        assert_eq!(
            expr.selectors,
            vec![
                Selector::Child("src".to_string()),
                Selector::RecursiveDescent,
                Selector::Child("name".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_bracket_notation() {
        let expr = parse("$['store'][\"first name\"]");
        assert_eq!(
            expr.selectors,
            vec![Selector::Child("store".to_string()), Selector::Child("first name".to_string())]
        );
    }

    #[test]
    fn test_parse_union() {
        let expr = parse("$.animals[0,1].name");
        assert_eq!(expr.selectors[1], Selector::Union(vec![Selector::Index(0), Selector::Index(1)]));

        let expr = parse("$['a', 'b']");
        assert_eq!(
            expr.selectors[0],
            Selector::Union(vec![Selector::Child("a".to_string()), Selector::Child("b".to_string())])
        );
    }

    #[test]
    fn test_parse_filter() {
        let expr = parse("$.books[?(@.price < 10 && @.author == 'John')]");
        match &expr.selectors[1] {
            Selector::Filter(FilterExpression::Binary { operator, .. }) => {
                assert_eq!(*operator, BinaryOperator::And)
            }
            other => panic!("Expected filter selector, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_filter_function_and_in() {
        let expr = parse("$.tags[?(length(@) > 2)]");
        assert!(matches!(expr.selectors[1], Selector::Filter(_)));

        let expr = parse("$.animals[?(@.species in $.allowed)]");
        match &expr.selectors[1] {
            Selector::Filter(FilterExpression::Binary { operator, .. }) => {
                assert_eq!(*operator, BinaryOperator::In)
            }
            other => panic!("Expected filter selector, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_hyphenated_property() {
        let expr = parse("$.headers.content-type");
        assert_eq!(expr.selectors[1], Selector::Child("content-type".to_string()));
    }

    #[test]
    fn test_parse_error_empty_input() {
        assert!(Parser::new("").is_err());
    }

    #[test]
    fn test_parse_error_invalid_start() {
        let err = Parser::new("invalid").unwrap().parse().unwrap_err();
        assert_eq!(err.position(), Some(0));
    }

    #[test]
    fn test_parse_error_unterminated_bracket() {
        assert!(Parser::new("$.test[").unwrap().parse().is_err());
        assert!(Parser::new("$.test['a").unwrap().parse().is_err());
    }

    #[test]
    fn test_parse_error_dangling_descent() {
        assert!(Parser::new("$.a..").unwrap().parse().is_err());
    }

    #[test]
    fn test_parse_error_zero_step() {
        assert!(Parser::new("$.a[::0]").unwrap().parse().is_err());
    }
}
