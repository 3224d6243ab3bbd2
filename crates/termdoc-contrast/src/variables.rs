//! CSS custom property extraction and resolution.
//!
//! Palettes define their colors as custom properties. Theme stylesheets put
//! shared values in `:root` blocks and each palette maps them in a block scoped
//! to its `data-palette` attribute:
//!
//! ```css
//! :root {
//!     --dark-fg: #e8e9ed;
//! }
//!
//! [data-palette="dark"] {
//!     --font-color: var(--dark-fg);
//!     --background-color: var(--missing, #222225);
//! }
//! ```
//!
//! # Collection
//!
//! [`Stylesheet::parse`] runs the stylesheet through `cssparser` and keeps the
//! custom properties of rules whose selector list contains `:root` on its own
//! or a selector whose rightmost compound is `[data-palette="<name>"]`, alone or
//! with a type selector or `:root`. Other rules and every at-rule (including
//! `@media` blocks) are skipped. Within a stylesheet a
//! later declaration replaces an earlier one.
//!
//! # Cascade
//!
//! [`Cascade`] layers stylesheets in load order the way a browser would for
//! an element carrying `data-palette`: every `:root` block first, then every
//! matching `[data-palette]` block, which has higher specificity.
//!
//! # Resolution
//!
//! `var(--name)` and `var(--name, fallback)` are followed through the merged
//! variables up to [`MAX_VAR_DEPTH`] levels. Cycles and unknown names without a
//! fallback resolve to `None`.

use std::collections::BTreeMap;
use std::path::Path;

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, ParseErrorKind, Parser, ParserInput,
    ParserState, QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::StylesheetError;

/// Custom property values keyed by name without the leading `--`.
pub type Variables = BTreeMap<String, String>;

/// Maximum number of `var()` hops followed while resolving a value.
pub const MAX_VAR_DEPTH: usize = 10;

static VAR_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^var\(\s*--([A-Za-z0-9_-]+)\s*(?:,(.*))?\)$").expect("var() pattern is valid")
});

/// Custom properties collected from one stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    root: Variables,
    palettes: BTreeMap<String, Variables>,
}

impl Stylesheet {
    /// Collects custom properties from CSS text.
    ///
    /// # Errors
    ///
    /// Returns [`StylesheetError::Parse`] if a `[data-palette]` attribute
    /// selector is malformed. Anything else that is not understood is skipped.
    pub fn parse(css: &str) -> Result<Self, StylesheetError> {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);

        let mut collector = VariableCollector {
            sheet: Stylesheet::default(),
        };

        let rules = cssparser::StyleSheetParser::new(&mut parser, &mut collector);
        for result in rules {
            let Err((error, slice)) = result else {
                continue;
            };
            match error.kind {
                ParseErrorKind::Custom(RuleError::MalformedPaletteSelector) => {
                    return Err(StylesheetError::Parse {
                        path: None,
                        line: error.location.line + 1,
                        column: error.location.column,
                        message: format!(
                            "malformed data-palette selector: {}",
                            slice.trim()
                        ),
                    });
                }
                _ => {
                    tracing::trace!(line = error.location.line + 1, "skipping rule without variables");
                }
            }
        }

        Ok(collector.sheet)
    }

    /// Reads and parses a stylesheet file.
    ///
    /// # Errors
    ///
    /// Returns [`StylesheetError::Io`] if the file cannot be read, or a parse
    /// error carrying the file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StylesheetError> {
        let path = path.as_ref();
        let css = std::fs::read_to_string(path).map_err(|source| StylesheetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let sheet = Self::parse(&css).map_err(|e| e.with_path(path))?;
        tracing::debug!(
            path = %path.display(),
            root = sheet.root.len(),
            palettes = sheet.palettes.len(),
            "loaded stylesheet variables"
        );
        Ok(sheet)
    }

    /// Variables declared in `:root` blocks.
    pub fn root_variables(&self) -> &Variables {
        &self.root
    }

    /// Variables declared in `[data-palette="<name>"]` blocks.
    pub fn palette_variables(&self, name: &str) -> Option<&Variables> {
        self.palettes.get(name)
    }

    /// Names of the palettes this stylesheet scopes variables to.
    pub fn palette_names(&self) -> impl Iterator<Item = &str> {
        self.palettes.keys().map(String::as_str)
    }
}

/// Stylesheets layered in load order.
#[derive(Debug, Clone, Default)]
pub struct Cascade {
    sheets: Vec<Stylesheet>,
}

impl Cascade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stylesheet after those already loaded.
    pub fn push(&mut self, sheet: Stylesheet) -> &mut Self {
        self.sheets.push(sheet);
        self
    }

    /// Adds a stylesheet, returning `self` for chaining.
    pub fn with(mut self, sheet: Stylesheet) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// Returns the merged, unresolved variables seen by `palette`.
    pub fn variables(&self, palette: &str) -> Variables {
        let mut merged = Variables::new();
        for sheet in &self.sheets {
            merged.extend(sheet.root.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        for sheet in &self.sheets {
            if let Some(scoped) = sheet.palettes.get(palette) {
                merged.extend(scoped.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        merged
    }

    /// Returns every variable seen by `palette` with `var()` references
    /// resolved. Unresolvable variables are left out.
    pub fn resolve(&self, palette: &str) -> Variables {
        let merged = self.variables(palette);
        merged
            .iter()
            .filter_map(|(name, value)| {
                let resolved = resolve_var(value, &merged);
                if resolved.is_none() {
                    tracing::debug!(palette, variable = %name, value = %value, "unresolvable variable");
                }
                resolved.map(|v| (name.clone(), v))
            })
            .collect()
    }
}

/// Resolves `var()` references in a value.
///
/// Values that are not a `var()` reference resolve to themselves (trimmed).
pub fn resolve_var(value: &str, vars: &Variables) -> Option<String> {
    resolve_at_depth(value, vars, MAX_VAR_DEPTH)
}

fn resolve_at_depth(value: &str, vars: &Variables, depth: usize) -> Option<String> {
    if depth == 0 {
        return None;
    }

    let value = value.trim();
    let Some(caps) = VAR_REFERENCE.captures(value) else {
        return Some(value.to_string());
    };

    let name = &caps[1];
    match (vars.get(name), caps.get(2)) {
        (Some(target), _) => resolve_at_depth(target, vars, depth - 1),
        (None, Some(fallback)) if !fallback.as_str().trim().is_empty() => {
            resolve_at_depth(fallback.as_str(), vars, depth - 1)
        }
        (None, _) => None,
    }
}

/// Where a rule's custom properties apply.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Scope {
    Root,
    Palette(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleError {
    /// The selector list has no `:root` or `[data-palette]` selector.
    Unscoped,
    /// A `[data-palette ...]` attribute selector without a usable value.
    MalformedPaletteSelector,
    /// A declaration that is not a custom property.
    NotCustomProperty,
}

/// Tracks the rightmost compound selector while scanning a prelude.
#[derive(Default)]
struct SelectorScan {
    /// A token of the current compound has been seen.
    started: bool,
    /// A combinator preceded the current compound.
    nested: bool,
    root: bool,
    other: bool,
    palette: Option<String>,
}

impl SelectorScan {
    /// Starts the next compound after a combinator.
    fn descend(&mut self) {
        *self = Self {
            nested: true,
            ..Self::default()
        };
    }

    fn finish(self) -> Option<Scope> {
        if !self.started || self.other {
            return None;
        }
        match self.palette {
            Some(name) => Some(Scope::Palette(name)),
            None if self.root && !self.nested => Some(Scope::Root),
            None => None,
        }
    }
}

struct VariableCollector {
    sheet: Stylesheet,
}

impl<'i> QualifiedRuleParser<'i> for VariableCollector {
    type Prelude = Vec<Scope>;
    type QualifiedRule = ();
    type Error = RuleError;

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let mut scopes = Vec::new();
        let mut current = SelectorScan::default();
        let mut descendant = false;

        while let Ok(token) = input.next_including_whitespace() {
            match token.clone() {
                Token::WhiteSpace(_) => descendant = current.started,
                Token::Comma => {
                    scopes.extend(std::mem::take(&mut current).finish());
                    descendant = false;
                }
                Token::Delim('>' | '+' | '~') => {
                    current.descend();
                    descendant = false;
                }
                token => {
                    if std::mem::take(&mut descendant) {
                        current.descend();
                    }
                    current.started = true;
                    match token {
                        // Type and universal selectors do not change the scope.
                        Token::Ident(_) | Token::Delim('*') => {}
                        Token::Colon => match input.next_including_whitespace() {
                            Ok(Token::Ident(name)) if name.eq_ignore_ascii_case("root") => {
                                current.root = true;
                            }
                            _ => current.other = true,
                        },
                        Token::SquareBracketBlock => {
                            match input.parse_nested_block(parse_palette_attribute) {
                                Ok(Some(name)) => current.palette = Some(name),
                                Ok(None) => current.other = true,
                                Err(_) => {
                                    return Err(
                                        input.new_custom_error(RuleError::MalformedPaletteSelector)
                                    )
                                }
                            }
                        }
                        _ => current.other = true,
                    }
                }
            }
        }
        scopes.extend(current.finish());

        if scopes.is_empty() {
            return Err(input.new_custom_error(RuleError::Unscoped));
        }
        Ok(scopes)
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let mut decl_parser = CustomPropertyParser;
        let body = RuleBodyParser::new(input, &mut decl_parser);
        let declarations: Vec<(String, String)> = body.flatten().collect();

        for scope in prelude {
            let target = match scope {
                Scope::Root => &mut self.sheet.root,
                Scope::Palette(name) => self.sheet.palettes.entry(name).or_default(),
            };
            for (name, value) in &declarations {
                target.insert(name.clone(), value.clone());
            }
        }
        Ok(())
    }
}

impl<'i> AtRuleParser<'i> for VariableCollector {
    type Prelude = ();
    type AtRule = ();
    type Error = RuleError;
}

/// Parses the inside of `[...]`.
///
/// Returns `Ok(None)` for attribute selectors other than `data-palette`, for a
/// bare `[data-palette]` presence test, and for operators other than `=`. An
/// `i` or `s` case flag may follow the value.
fn parse_palette_attribute<'i, 't>(
    input: &mut Parser<'i, 't>,
) -> Result<Option<String>, ParseError<'i, RuleError>> {
    let is_palette = input
        .expect_ident()
        .map(|name| name.eq_ignore_ascii_case("data-palette"))
        .unwrap_or(false);
    if !is_palette || input.is_exhausted() {
        while input.next().is_ok() {}
        return Ok(None);
    }

    let is_equals = matches!(input.next()?, Token::Delim('='));
    if !is_equals {
        while input.next().is_ok() {}
        return Ok(None);
    }

    let value = input.expect_ident_or_string()?.as_ref().to_string();
    if value.is_empty() {
        return Err(input.new_custom_error(RuleError::MalformedPaletteSelector));
    }

    if !input.is_exhausted() {
        let is_flag = input
            .expect_ident()
            .map(|flag| flag.eq_ignore_ascii_case("i") || flag.eq_ignore_ascii_case("s"))
            .unwrap_or(false);
        if !is_flag || !input.is_exhausted() {
            return Err(input.new_custom_error(RuleError::MalformedPaletteSelector));
        }
    }
    Ok(Some(value))
}

struct CustomPropertyParser;

impl<'i> DeclarationParser<'i> for CustomPropertyParser {
    type Declaration = (String, String);
    type Error = RuleError;

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let Some(var_name) = name.strip_prefix("--") else {
            while input.next().is_ok() {}
            return Err(input.new_custom_error(RuleError::NotCustomProperty));
        };

        let mut value = String::new();
        loop {
            let start = input.position();
            match input.next_including_whitespace_and_comments() {
                Ok(Token::Comment(_)) => continue,
                Ok(_) => value.push_str(input.slice_from(start)),
                Err(_) => {
                    // A trailing function or block is only consumed here.
                    value.push_str(input.slice_from(start));
                    break;
                }
            }
        }

        Ok((var_name.to_string(), strip_important(value.trim()).to_string()))
    }
}

impl<'i> AtRuleParser<'i> for CustomPropertyParser {
    type Prelude = ();
    type AtRule = (String, String);
    type Error = RuleError;
}

impl<'i> QualifiedRuleParser<'i> for CustomPropertyParser {
    type Prelude = ();
    type QualifiedRule = (String, String);
    type Error = RuleError;
}

impl<'i> RuleBodyItemParser<'i, (String, String), RuleError> for CustomPropertyParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

fn strip_important(value: &str) -> &str {
    let lower = value.to_ascii_lowercase();
    match lower.strip_suffix("important") {
        Some(rest) if rest.trim_end().ends_with('!') => {
            let bang = rest.trim_end().len() - 1;
            value[..bang].trim_end()
        }
        _ => value,
    }
}
