// src/template.rs
use crate::errors::{Result, TemplateError};

/// Named pieces of a "want / got" failure message.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    pub want_text: &'a str,
    pub want: &'a str,
    pub got_text: &'a str,
    pub got: &'a str,
}

/// Strategy turning [`Fields`] into the text of a failure message.
pub trait Formatter: Send + Sync {
    fn format(&self, fields: &Fields<'_>) -> String;
}

pub const DEFAULT_TEMPLATE: &str = "{want_text} {want}, {got_text} {got}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    WantText,
    Want,
    GotText,
    Got,
}

impl Field {
    fn from_name(name: &str) -> Option<Field> {
        match name {
            "want_text" => Some(Field::WantText),
            "want" => Some(Field::Want),
            "got_text" => Some(Field::GotText),
            "got" => Some(Field::Got),
            _ => None,
        }
    }

    fn pick<'a>(self, fields: &Fields<'a>) -> &'a str {
        match self {
            Field::WantText => fields.want_text,
            Field::Want => fields.want,
            Field::GotText => fields.got_text,
            Field::Got => fields.got,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Field(Field),
}

/// Token-substitution message template.
///
/// `{want_text}`, `{want}`, `{got_text}` and `{got}` are replaced by the
/// matching field; `{{` and `}}` produce literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pieces: Vec<Piece>,
}

impl Template {
    pub fn parse(input: &str) -> Result<Template> {
        TemplateParser::new(input).parse()
    }
}

impl Default for Template {
    fn default() -> Self {
        Template {
            pieces: vec![
                Piece::Field(Field::WantText),
                Piece::Literal(" ".into()),
                Piece::Field(Field::Want),
                Piece::Literal(", ".into()),
                Piece::Field(Field::GotText),
                Piece::Literal(" ".into()),
                Piece::Field(Field::Got),
            ],
        }
    }
}

impl Formatter for Template {
    fn format(&self, fields: &Fields<'_>) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Field(field) => out.push_str(field.pick(fields)),
            }
        }
        out
    }
}

struct TemplateParser<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> TemplateParser<'a> {
    fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    fn parse(&mut self) -> Result<Template> {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        while let Some(c) = self.peek_char() {
            match c {
                '{' if self.peek_str("{{") => {
                    self.i += 2;
                    literal.push('{');
                }
                '}' if self.peek_str("}}") => {
                    self.i += 2;
                    literal.push('}');
                }
                '{' => {
                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(Piece::Field(self.parse_field()?));
                }
                '}' => return Err(TemplateError::UnmatchedClose(self.i)),
                _ => {
                    self.i += c.len_utf8();
                    literal.push(c);
                }
            }
        }
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }
        Ok(Template { pieces })
    }

    fn parse_field(&mut self) -> Result<Field> {
        let open = self.i;
        self.consume_char('{');
        let start = self.i;
        while let Some(c) = self.peek_char() {
            if c == '}' {
                let name = &self.s[start..self.i];
                self.i += 1;
                return Field::from_name(name).ok_or_else(|| TemplateError::UnknownField {
                    name: name.to_string(),
                    offset: open,
                });
            }
            if c == '{' {
                break;
            }
            self.i += c.len_utf8();
        }
        Err(TemplateError::Unclosed(open))
    }

    fn peek_char(&self) -> Option<char> {
        self.s[self.i..].chars().next()
    }

    fn peek_str(&self, pat: &str) -> bool {
        self.s[self.i..].starts_with(pat)
    }

    fn consume_char(&mut self, ch: char) -> bool {
        if self.peek_char() == Some(ch) {
            self.i += ch.len_utf8();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields() -> Fields<'static> {
        Fields {
            want_text: "want",
            want: "<nil>",
            got_text: "got",
            got: "[]",
        }
    }

    #[test]
    fn default_template_matches_parsed_default() {
        assert_eq!(Template::parse(DEFAULT_TEMPLATE).unwrap(), Template::default());
        assert_eq!(Template::default().format(&fields()), "want <nil>, got []");
    }

    #[test]
    fn custom_order_and_escapes() {
        let t = Template::parse("{got_text}={got} {{expected {want}}}").unwrap();
        assert_eq!(t.format(&fields()), "got=[] {expected <nil>}");
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Template::parse("{wanted}"),
            Err(TemplateError::UnknownField {
                name: "wanted".into(),
                offset: 0
            })
        );
        assert_eq!(Template::parse("x {got"), Err(TemplateError::Unclosed(2)));
        assert_eq!(Template::parse("a } b"), Err(TemplateError::UnmatchedClose(2)));
    }
}
