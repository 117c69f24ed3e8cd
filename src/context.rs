use crate::classify::{is_nil, is_zero, length};
use crate::comparison::diff;
use crate::errors::Result;
use crate::shape::Inspect;
use crate::sink::Sink;
use crate::template::{Fields, Formatter, Template};
use std::any::type_name;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_WANT_TEXT: &str = "want";
pub const DEFAULT_GOT_TEXT: &str = "got";

/// How values are rendered into failure messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verb {
    /// `{:?}`
    #[default]
    Debug,
    /// `{:#?}`
    Pretty,
}

impl Verb {
    fn render(self, v: &dyn fmt::Debug) -> String {
        match self {
            Verb::Debug => format!("{v:?}"),
            Verb::Pretty => format!("{v:#?}"),
        }
    }
}

enum Message {
    Plain(String),
    Mismatch { want: String, got: String },
}

/// Assertion context bound to a [`Sink`].
///
/// Contexts are never modified after construction. Every `with_*` method
/// returns a new context that shares the sink and copies the rest of the
/// configuration, so a context and anything derived from it can be used
/// independently, including from different threads.
///
/// ```
/// use fluent_assert::{Assert, Recorder};
///
/// let sink = Recorder::new();
/// let assert = Assert::new(&sink);
///
/// assert!(assert.len(&"hello world", 11));
/// assert!(!assert.with_field("Age").equal(&18, &20));
/// assert!(sink.last_message().unwrap().starts_with("Age: "));
/// ```
#[derive(Clone)]
pub struct Assert<'s> {
    sink: &'s dyn Sink,
    required: bool,
    field: String,
    want_text: String,
    got_text: String,
    verb: Verb,
    formatter: Arc<dyn Formatter>,
}

impl<'s> Assert<'s> {
    pub fn new(sink: &'s dyn Sink) -> Self {
        Self {
            sink,
            required: false,
            field: String::new(),
            want_text: DEFAULT_WANT_TEXT.to_string(),
            got_text: DEFAULT_GOT_TEXT.to_string(),
            verb: Verb::Debug,
            formatter: Arc::new(Template::default()),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Label failure messages with `"{label}: "`. Replaces any earlier label.
    pub fn with_field(&self, label: impl Into<String>) -> Self {
        Self {
            field: label.into(),
            ..self.clone()
        }
    }

    /// Abort the test on failure instead of recording and continuing.
    pub fn with_required(&self) -> Self {
        Self {
            required: true,
            ..self.clone()
        }
    }

    pub fn with_want_text(&self, text: impl Into<String>) -> Self {
        Self {
            want_text: text.into(),
            ..self.clone()
        }
    }

    pub fn with_got_text(&self, text: impl Into<String>) -> Self {
        Self {
            got_text: text.into(),
            ..self.clone()
        }
    }

    pub fn with_verb(&self, verb: Verb) -> Self {
        Self {
            verb,
            ..self.clone()
        }
    }

    /// Parse `template` and use it for "want / got" messages. On a parse
    /// error nothing is derived and `self` is unaffected.
    pub fn with_template(&self, template: &str) -> Result<Self> {
        let template = Template::parse(template)?;
        Ok(self.with_formatter(template))
    }

    pub fn with_formatter(&self, formatter: impl Formatter + 'static) -> Self {
        Self {
            formatter: Arc::new(formatter),
            ..self.clone()
        }
    }

    /// Passes when `want` and `got` have the same type and compare equal.
    #[track_caller]
    pub fn equal<W, G>(&self, want: &W, got: &G) -> bool
    where
        W: ?Sized + PartialEq<G> + fmt::Debug,
        G: ?Sized + fmt::Debug,
    {
        self.sink.mark_helper();
        let delta = diff(want, got);
        if delta.is_empty() {
            return true;
        }
        self.fail(Message::Plain(delta))
    }

    #[track_caller]
    pub fn not_equal<W, G>(&self, want: &W, got: &G) -> bool
    where
        W: ?Sized + PartialEq<G> + fmt::Debug,
        G: ?Sized + fmt::Debug,
    {
        self.sink.mark_helper();
        if !diff(want, got).is_empty() {
            return true;
        }
        self.fail(Message::Mismatch {
            want: "non-equal values".into(),
            got: "equal values".into(),
        })
    }

    #[track_caller]
    pub fn nil<T: Inspect>(&self, got: &T) -> bool {
        self.sink.mark_helper();
        if is_nil(got) {
            return true;
        }
        self.fail(Message::Mismatch {
            want: "<nil>".into(),
            got: self.verb.render(got),
        })
    }

    #[track_caller]
    pub fn not_nil<T: Inspect>(&self, got: &T) -> bool {
        self.sink.mark_helper();
        if !is_nil(got) {
            return true;
        }
        self.fail(Message::Mismatch {
            want: "<non-nil>".into(),
            got: "<nil>".into(),
        })
    }

    #[track_caller]
    pub fn zero<T: Inspect>(&self, got: &T) -> bool {
        self.sink.mark_helper();
        if is_zero(got) {
            return true;
        }
        self.fail(Message::Mismatch {
            want: "zero value".into(),
            got: self.verb.render(got),
        })
    }

    #[track_caller]
    pub fn not_zero<T: Inspect>(&self, got: &T) -> bool {
        self.sink.mark_helper();
        if !is_zero(got) {
            return true;
        }
        self.fail(Message::Mismatch {
            want: "non-zero value".into(),
            got: self.verb.render(got),
        })
    }

    /// Passes when `got` has a length and it equals `n`. Values without a
    /// length (numbers, plain structs) always fail.
    #[track_caller]
    pub fn len<T: Inspect>(&self, got: &T, n: usize) -> bool {
        self.sink.mark_helper();
        match length(got) {
            Some(actual) if actual == n => true,
            Some(actual) => self.fail(Message::Mismatch {
                want: format!("length = {n}"),
                got: actual.to_string(),
            }),
            None => self.fail(Message::Plain(format!(
                "could not apply length to {} `{}`",
                got.shape(),
                type_name::<T>()
            ))),
        }
    }

    /// Passes when some error in `err`'s source chain is a `E` equal to
    /// `target`. Two absent errors match; an absent error never matches a
    /// present target and vice versa.
    #[track_caller]
    pub fn error_is<E>(&self, err: Option<&(dyn Error + 'static)>, target: Option<&E>) -> bool
    where
        E: Error + PartialEq + 'static,
    {
        self.sink.mark_helper();
        let matched = match (err, target) {
            (None, None) => true,
            (Some(err), Some(target)) => chain_contains(err, target),
            _ => false,
        };
        if matched {
            return true;
        }
        self.fail(Message::Plain(
            "no error in err's chain matches target".into(),
        ))
    }

    #[track_caller]
    fn fail(&self, message: Message) -> bool {
        let body = match message {
            Message::Plain(text) => text,
            Message::Mismatch { want, got } => self.formatter.format(&Fields {
                want_text: &self.want_text,
                want: &want,
                got_text: &self.got_text,
                got: &got,
            }),
        };
        let text = if self.field.is_empty() {
            body
        } else {
            format!("{}: {}", self.field, body)
        };
        debug!(field = %self.field, required = self.required, failure = %text, "assertion failed");
        if self.required {
            self.sink.report_and_abort(&text);
        }
        self.sink.report_and_continue(&text);
        false
    }
}

fn chain_contains<E>(err: &(dyn Error + 'static), target: &E) -> bool
where
    E: Error + PartialEq + 'static,
{
    let mut current = Some(err);
    while let Some(e) = current {
        if e.downcast_ref::<E>().is_some_and(|e| e == target) {
            return true;
        }
        current = e.source();
    }
    false
}

impl fmt::Debug for Assert<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assert")
            .field("required", &self.required)
            .field("field", &self.field)
            .field("want_text", &self.want_text)
            .field("got_text", &self.got_text)
            .field("verb", &self.verb)
            .finish_non_exhaustive()
    }
}
