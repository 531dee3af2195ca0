//! Prompt Templates
//!
//! Immutable prompt records with explicit named slots. A template body uses
//! `{slot_name}` placeholders; `{{` and `}}` produce literal braces.
//!
//! Rendering is a single pass over the parsed segments: substituted values are
//! never rescanned, so user text containing `{user_query}` stays literal.

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(String),
}

/// A named prompt template with parsed interpolation slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    name: String,
    segments: Vec<Segment>,
    slots: Vec<String>,
}

impl PromptTemplate {
    /// Parse a template body.
    ///
    /// Fails when a `{` opens a slot that is never closed or whose name is not
    /// an identifier (`[A-Za-z_][A-Za-z0-9_]*`).
    pub fn new(name: impl Into<String>, body: &str) -> CoreResult<Self> {
        let name = name.into();
        let mut segments = Vec::new();
        let mut slots: Vec<String> = Vec::new();
        let mut literal = String::new();
        let mut chars = body.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut slot = String::new();
                    let mut closed = false;
                    for next in chars.by_ref() {
                        if next == '}' {
                            closed = true;
                            break;
                        }
                        slot.push(next);
                    }
                    if !closed {
                        return Err(CoreError::malformed(&name, "unclosed '{'"));
                    }
                    if !is_identifier(&slot) {
                        return Err(CoreError::malformed(
                            &name,
                            format!("invalid slot name '{}'", slot),
                        ));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    if !slots.contains(&slot) {
                        slots.push(slot.clone());
                    }
                    segments.push(Segment::Slot(slot));
                }
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            name,
            segments,
            slots,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slot names in order of first appearance.
    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// Fill every slot from `values`. Extra values are ignored; a missing one
    /// is an error.
    pub fn render(&self, values: &[(&str, &str)]) -> CoreResult<String> {
        let provided: HashSet<&str> = values.iter().map(|(k, _)| *k).collect();
        if let Some(missing) = self.slots.iter().find(|s| !provided.contains(s.as_str())) {
            return Err(CoreError::missing_slot(&self.name, missing));
        }

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(slot) => {
                    if let Some((_, value)) = values.iter().find(|(k, _)| *k == slot) {
                        out.push_str(value);
                    }
                }
            }
        }
        Ok(out)
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
