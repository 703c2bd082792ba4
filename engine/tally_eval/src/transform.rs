//! Source-text transforms applied before parsing.
//!
//! Transforms let a host rewrite expression text (house-rule notations,
//! shorthand expansion) without touching the grammar. The engine
//! sandwiches every registered transform between
//! [`StringLiteralTransformer::conceal`] and
//! [`StringLiteralTransformer::restore`], so rewrites never see the
//! inside of quoted strings.

use std::sync::OnceLock;

use regex::Regex;
use rustc_hash::FxHashMap;

/// A text-to-text rewrite of expression source.
pub trait Transform {
    fn transform(&self, input: &str) -> String;
}

/// Ordered regex rewrites with `$n` capture substitution.
pub struct RegexTransform {
    rules: Vec<(Regex, String)>,
}

impl RegexTransform {
    /// Compile an ordered list of `(pattern, replacement)` rules.
    pub fn new<'a, I>(rules: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut compiled = Vec::new();
        for (pattern, replacement) in rules {
            compiled.push((Regex::new(pattern)?, replacement.to_owned()));
        }
        Ok(RegexTransform { rules: compiled })
    }
}

impl Transform for RegexTransform {
    fn transform(&self, input: &str) -> String {
        let mut text = input.to_owned();
        for (pattern, replacement) in &self.rules {
            text = pattern.replace_all(&text, replacement.as_str()).into_owned();
        }
        text
    }
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        #[expect(clippy::expect_used, reason = "literal pattern always compiles")]
        let re = Regex::new(r"StringLiteral\d+Token").expect("literal pattern");
        re
    })
}

/// Hides string literals behind placeholder identifiers and puts them
/// back afterwards.
///
/// `conceal` replaces each quoted literal (either quote style, quotes
/// included) with `StringLiteral{n}Token` from a monotonic counter;
/// `restore` swaps the placeholders back. Each placeholder is single-use.
/// One transformer instance serves one conceal/restore round.
pub struct StringLiteralTransformer {
    next: usize,
    stash: FxHashMap<String, String>,
}

impl StringLiteralTransformer {
    pub fn new() -> Self {
        StringLiteralTransformer {
            next: 0,
            stash: FxHashMap::default(),
        }
    }

    /// Replace every quoted literal with a placeholder identifier.
    ///
    /// An unterminated literal is passed through unchanged; the parser
    /// reports it.
    pub fn conceal(&mut self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;
        while let Some(pos) = rest.find(['\'', '"']) {
            out.push_str(&rest[..pos]);
            let quote = &rest[pos..=pos];
            let after = &rest[pos + 1..];
            match after.find(quote) {
                Some(end) => {
                    let literal = &rest[pos..pos + 1 + end + 1];
                    let placeholder = format!("StringLiteral{}Token", self.next);
                    self.next += 1;
                    self.stash.insert(placeholder.clone(), literal.to_owned());
                    out.push_str(&placeholder);
                    rest = &after[end + 1..];
                }
                None => {
                    out.push_str(&rest[pos..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Replace placeholders with their stashed literals.
    ///
    /// Placeholder-shaped text that was never stashed (or already
    /// restored) is left alone.
    pub fn restore(&mut self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut last = 0;
        for found in placeholder_regex().find_iter(input) {
            out.push_str(&input[last..found.start()]);
            match self.stash.remove(found.as_str()) {
                Some(literal) => out.push_str(&literal),
                None => out.push_str(found.as_str()),
            }
            last = found.end();
        }
        out.push_str(&input[last..]);
        out
    }
}

impl Default for StringLiteralTransformer {
    fn default() -> Self {
        StringLiteralTransformer::new()
    }
}
