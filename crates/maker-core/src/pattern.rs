//! Regular expression operator trees.
//!
//! A pattern is parsed once with `regex-syntax` and lowered into a
//! [`RegexOp`] tree. The tree is immutable and only read during generation,
//! so one [`RegexPattern`] can be shared by every plan and every fill that
//! uses it.
//!
//! Lowering also simplifies repetition: `x*`, `x+` and `x?` keep dedicated
//! operators, `x{n,m}` becomes an explicit [`RegexOp::Repeat`], and the
//! open-ended `x{n,}` becomes `x{n,n}` followed by `x*`.
//!
//! Perl classes (`\d`, `\w`, `\s`) are ASCII-only, while literals and
//! `\p{..}` classes keep their Unicode meaning.

use crate::directive::DirectiveError;
use regex_syntax::ast::{
    self, Ast, ClassAscii, ClassAsciiKind, ClassBracketed, ClassPerl, ClassPerlKind, ClassSet,
    ClassSetItem,
};
use regex_syntax::hir::{self, Hir, HirKind};

/// Character ranges that `.` lowers to with the `s` flag, without it, and
/// under the `R` flag.
const ANY_CHAR: &[(char, char)] = &[('\0', '\u{10FFFF}')];
const ANY_CHAR_NOT_NL: &[(char, char)] = &[('\0', '\t'), ('\u{B}', '\u{10FFFF}')];
const ANY_CHAR_NOT_CRLF: &[(char, char)] =
    &[('\0', '\t'), ('\u{B}', '\u{C}'), ('\u{E}', '\u{10FFFF}')];

/// A node of the operator tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexOp {
    /// Literal text, emitted verbatim
    Literal(String),
    /// Children matched one after the other
    Concat(Vec<RegexOp>),
    /// One of several branches
    Alternate(Vec<RegexOp>),
    /// Zero or more repetitions
    Star(Box<RegexOp>),
    /// One or more repetitions
    Plus(Box<RegexOp>),
    /// Zero or one repetition
    Quest(Box<RegexOp>),
    /// Bounded repetition, both ends inclusive
    Repeat { sub: Box<RegexOp>, min: u32, max: u32 },
    /// Inclusive code point ranges
    CharClass(Vec<(char, char)>),
    /// Capturing group
    Capture(Box<RegexOp>),
    /// `(?s:.)`
    AnyChar,
    /// `.`
    AnyCharNotNewline,
    /// Matches the empty string
    EmptyMatch,
    /// Anchors and word boundaries
    Assertion,
}

impl RegexOp {
    /// Lower a parsed HIR into an operator tree.
    pub fn from_hir(hir: &Hir) -> Result<Self, DirectiveError> {
        match hir.kind() {
            HirKind::Empty => Ok(RegexOp::EmptyMatch),
            HirKind::Literal(hir::Literal(bytes)) => std::str::from_utf8(bytes)
                .map(|text| RegexOp::Literal(text.to_string()))
                .map_err(|_| DirectiveError::UnsupportedOperator("non-UTF-8 literal".to_string())),
            HirKind::Class(hir::Class::Unicode(class)) => {
                let ranges: Vec<(char, char)> = class
                    .ranges()
                    .iter()
                    .map(|range| (range.start(), range.end()))
                    .collect();
                Self::from_ranges(ranges)
            }
            HirKind::Class(hir::Class::Bytes(class)) => {
                if class.ranges().iter().any(|range| !range.end().is_ascii()) {
                    return Err(DirectiveError::UnsupportedOperator(
                        "non-ASCII byte class".to_string(),
                    ));
                }
                let ranges = class
                    .ranges()
                    .iter()
                    .map(|range| (char::from(range.start()), char::from(range.end())))
                    .collect();
                Self::from_ranges(ranges)
            }
            HirKind::Look(_) => Ok(RegexOp::Assertion),
            HirKind::Repetition(repetition) => {
                let sub = Box::new(Self::from_hir(&repetition.sub)?);
                Ok(match (repetition.min, repetition.max) {
                    (0, None) => RegexOp::Star(sub),
                    (1, None) => RegexOp::Plus(sub),
                    (0, Some(1)) => RegexOp::Quest(sub),
                    (min, Some(max)) => RegexOp::Repeat { sub, min, max },
                    (min, None) => RegexOp::Concat(vec![
                        RegexOp::Repeat {
                            sub: sub.clone(),
                            min,
                            max: min,
                        },
                        RegexOp::Star(sub),
                    ]),
                })
            }
            HirKind::Capture(capture) => Ok(RegexOp::Capture(Box::new(Self::from_hir(
                &capture.sub,
            )?))),
            HirKind::Concat(subs) => Ok(RegexOp::Concat(
                subs.iter().map(Self::from_hir).collect::<Result<_, _>>()?,
            )),
            HirKind::Alternation(subs) => Ok(RegexOp::Alternate(
                subs.iter().map(Self::from_hir).collect::<Result<_, _>>()?,
            )),
        }
    }

    fn from_ranges(ranges: Vec<(char, char)>) -> Result<Self, DirectiveError> {
        if ranges.is_empty() {
            return Err(DirectiveError::UnsupportedOperator(
                "empty character class".to_string(),
            ));
        }
        Ok(if ranges == ANY_CHAR {
            RegexOp::AnyChar
        } else if ranges == ANY_CHAR_NOT_NL || ranges == ANY_CHAR_NOT_CRLF {
            RegexOp::AnyCharNotNewline
        } else {
            RegexOp::CharClass(ranges)
        })
    }

    /// Operator name, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            RegexOp::Literal(_) => "literal",
            RegexOp::Concat(_) => "concat",
            RegexOp::Alternate(_) => "alternate",
            RegexOp::Star(_) => "star",
            RegexOp::Plus(_) => "plus",
            RegexOp::Quest(_) => "quest",
            RegexOp::Repeat { .. } => "repeat",
            RegexOp::CharClass(_) => "char class",
            RegexOp::Capture(_) => "capture",
            RegexOp::AnyChar => "any char",
            RegexOp::AnyCharNotNewline => "any char not newline",
            RegexOp::EmptyMatch => "empty match",
            RegexOp::Assertion => "assertion",
        }
    }
}

/// A parsed pattern together with its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexPattern {
    source: String,
    root: RegexOp,
}

impl RegexPattern {
    /// Parse a bare pattern (without the `regex[..]` wrapper).
    pub fn parse(source: &str) -> Result<Self, DirectiveError> {
        let mut ast = ast::parse::Parser::new()
            .parse(source)
            .map_err(|e| DirectiveError::RegexParse(e.to_string()))?;
        ascii_perl_classes(&mut ast);
        let hir = hir::translate::Translator::new()
            .translate(source, &ast)
            .map_err(|e| DirectiveError::RegexParse(e.to_string()))?;

        Ok(Self {
            source: source.to_string(),
            root: RegexOp::from_hir(&hir)?,
        })
    }

    /// Parse a full `regex[pattern]` directive.
    ///
    /// A missing wrapper is a validation failure, distinct from a pattern
    /// that does not parse.
    pub fn from_directive(raw: &str) -> Result<Self, DirectiveError> {
        let source = raw
            .strip_prefix("regex[")
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or(DirectiveError::RegexValidation)?;
        Self::parse(source)
    }

    /// The pattern text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Root of the operator tree.
    pub fn root(&self) -> &RegexOp {
        &self.root
    }
}

/// Rewrite every Perl class in `ast` into the equivalent POSIX ASCII class.
fn ascii_perl_classes(ast: &mut Ast) {
    match ast {
        Ast::ClassPerl(perl) => {
            let class = ClassBracketed {
                span: perl.span,
                negated: false,
                kind: ClassSet::Item(ClassSetItem::Ascii(ascii_class(perl))),
            };
            *ast = Ast::ClassBracketed(Box::new(class));
        }
        Ast::ClassBracketed(class) => ascii_class_set(&mut class.kind),
        Ast::Repetition(repetition) => ascii_perl_classes(&mut repetition.ast),
        Ast::Group(group) => ascii_perl_classes(&mut group.ast),
        Ast::Alternation(alternation) => alternation.asts.iter_mut().for_each(ascii_perl_classes),
        Ast::Concat(concat) => concat.asts.iter_mut().for_each(ascii_perl_classes),
        _ => {}
    }
}

fn ascii_class_set(set: &mut ClassSet) {
    match set {
        ClassSet::Item(item) => ascii_class_item(item),
        ClassSet::BinaryOp(op) => {
            ascii_class_set(&mut op.lhs);
            ascii_class_set(&mut op.rhs);
        }
    }
}

fn ascii_class_item(item: &mut ClassSetItem) {
    match item {
        ClassSetItem::Perl(perl) => {
            let ascii = ascii_class(perl);
            *item = ClassSetItem::Ascii(ascii);
        }
        ClassSetItem::Bracketed(class) => ascii_class_set(&mut class.kind),
        ClassSetItem::Union(union) => union.items.iter_mut().for_each(ascii_class_item),
        _ => {}
    }
}

fn ascii_class(perl: &ClassPerl) -> ClassAscii {
    let kind = match perl.kind {
        ClassPerlKind::Digit => ClassAsciiKind::Digit,
        ClassPerlKind::Space => ClassAsciiKind::Space,
        ClassPerlKind::Word => ClassAsciiKind::Word,
    };
    ClassAscii {
        span: perl.span,
        kind,
        negated: perl.negated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(pattern: &str) -> RegexOp {
        RegexPattern::parse(pattern).unwrap().root().clone()
    }

    #[test]
    fn test_literal() {
        assert_eq!(root("abc"), RegexOp::Literal("abc".to_string()));
    }

    #[test]
    fn test_any_char() {
        assert_eq!(root("."), RegexOp::AnyCharNotNewline);
        assert_eq!(root("(?s)."), RegexOp::AnyChar);
        assert_eq!(root("(?R)."), RegexOp::AnyCharNotNewline);
    }

    #[test]
    fn test_perl_classes_are_ascii() {
        assert_eq!(root(r"\d"), RegexOp::CharClass(vec![('0', '9')]));
        assert_eq!(
            root(r"\w"),
            RegexOp::CharClass(vec![('0', '9'), ('A', 'Z'), ('_', '_'), ('a', 'z')])
        );
        assert_eq!(
            root(r"\s"),
            RegexOp::CharClass(vec![('\t', '\r'), (' ', ' ')])
        );
        assert_eq!(root(r"[\d_]"), RegexOp::CharClass(vec![('0', '9'), ('_', '_')]));
    }

    #[test]
    fn test_negated_perl_class_excludes_ascii_digits() {
        match root(r"\D") {
            RegexOp::CharClass(ranges) => {
                assert_eq!(ranges[0], ('\0', '/'));
                assert_eq!(ranges[1].0, ':');
            }
            other => panic!("Expected CharClass, got {other:?}"),
        }
    }

    #[test]
    fn test_unicode_literals_and_properties_kept() {
        assert_eq!(root("é"), RegexOp::Literal("é".to_string()));
        match root(r"\p{Greek}") {
            RegexOp::CharClass(ranges) => assert!(ranges.iter().any(|&(_, end)| end > '\u{FF}')),
            other => panic!("Expected CharClass, got {other:?}"),
        }
    }

    #[test]
    fn test_quantifiers() {
        let a = || Box::new(RegexOp::Literal("a".to_string()));

        assert_eq!(root("a*"), RegexOp::Star(a()));
        assert_eq!(root("a+"), RegexOp::Plus(a()));
        assert_eq!(root("a?"), RegexOp::Quest(a()));
        assert_eq!(
            root("a{2,5}"),
            RegexOp::Repeat {
                sub: a(),
                min: 2,
                max: 5
            }
        );
        assert_eq!(
            root("a{3}"),
            RegexOp::Repeat {
                sub: a(),
                min: 3,
                max: 3
            }
        );
    }

    #[test]
    fn test_open_ended_repeat_expands() {
        let a = || Box::new(RegexOp::Literal("a".to_string()));

        assert_eq!(
            root("a{2,}"),
            RegexOp::Concat(vec![
                RegexOp::Repeat {
                    sub: a(),
                    min: 2,
                    max: 2
                },
                RegexOp::Star(a()),
            ])
        );
    }

    #[test]
    fn test_char_class() {
        assert_eq!(
            root("[a-cx]"),
            RegexOp::CharClass(vec![('a', 'c'), ('x', 'x')])
        );
    }

    #[test]
    fn test_anchors_are_assertions() {
        match root("^a$") {
            RegexOp::Concat(subs) => {
                assert_eq!(subs.len(), 3);
                assert_eq!(subs[0], RegexOp::Assertion);
                assert_eq!(subs[2], RegexOp::Assertion);
            }
            other => panic!("Expected Concat, got {other:?}"),
        }
    }

    #[test]
    fn test_capture_and_alternate() {
        match root("(foo|bar)") {
            RegexOp::Capture(sub) => assert!(matches!(*sub, RegexOp::Alternate(_))),
            other => panic!("Expected Capture, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_class_is_unsupported() {
        let err = RegexPattern::parse(r"[^\x00-\x{10FFFF}]").unwrap_err();
        assert!(matches!(err, DirectiveError::UnsupportedOperator(_)));
    }

    #[test]
    fn test_from_directive() {
        let pattern = RegexPattern::from_directive("regex[[0-9]{4}]").unwrap();
        assert_eq!(pattern.source(), "[0-9]{4}");

        assert_eq!(
            RegexPattern::from_directive("regex[abc").unwrap_err(),
            DirectiveError::RegexValidation
        );
        assert!(matches!(
            RegexPattern::from_directive("regex[(abc]").unwrap_err(),
            DirectiveError::RegexParse(_)
        ));
    }
}
