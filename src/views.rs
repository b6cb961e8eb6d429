use axum::response::Html;
use chrono::DateTime;
use minijinja::{Environment, Value};
use serde::Serialize;

const EXCERPT_CHARS: usize = 100;

/// Compiled page templates. Names ending in `.html` are auto-escaped; the
/// only raw output is the already sanitized blog body on the detail page.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("layout.html", include_str!("../templates/layout.html"))?;
        env.add_template("index.html", include_str!("../templates/index.html"))?;
        env.add_template("new.html", include_str!("../templates/new.html"))?;
        env.add_template("show.html", include_str!("../templates/show.html"))?;
        env.add_template("edit.html", include_str!("../templates/edit.html"))?;
        env.add_filter("excerpt", excerpt);
        env.add_filter("datestring", datestring);
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, minijinja::Error> {
        let html = self.env.get_template(name)?.render(ctx)?;
        Ok(Html(html))
    }
}

/// Tag-free preview of a body for the listing page.
fn excerpt(value: String, chars: Option<usize>) -> Value {
    let chars = chars.unwrap_or(EXCERPT_CHARS);
    let text = ammonia::Builder::empty().clean(&value).to_string();
    let (mut cut, truncated) = truncate_escaped(&text, chars);
    if truncated {
        cut.push_str("...");
    }
    Value::from_safe_string(cut)
}

/// Keeps the first `chars` visible characters of escaped text, counting an
/// entity such as `&amp;` as one character so it is never split.
fn truncate_escaped(text: &str, chars: usize) -> (String, bool) {
    let mut out = String::new();
    let mut rest = text;
    for _ in 0..chars {
        let Some(c) = rest.chars().next() else {
            return (out, false);
        };
        let len = match (c, rest.find(';')) {
            ('&', Some(end)) => end + 1,
            _ => c.len_utf8(),
        };
        out.push_str(&rest[..len]);
        rest = &rest[len..];
    }
    (out, !rest.is_empty())
}

/// `2026-10-16T09:30:00Z` -> `Fri Oct 16 2026`. Unparsable input is shown as is.
fn datestring(value: String) -> String {
    match DateTime::parse_from_rfc3339(&value) {
        Ok(ts) => ts.format("%a %b %d %Y").to_string(),
        Err(_) => value,
    }
}
