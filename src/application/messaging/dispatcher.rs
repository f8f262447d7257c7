//! Command dispatcher - Routes a parsed message through an ordered rule list
//!
//! Rules are evaluated in registration order and the first match wins.
//! Several keyword rules overlap (`SUBSCRIBE` vs `SUBSCRIBE DAILY`), so the
//! order of registration is part of the behaviour.

use super::parser::{MessageParser, ParsedCommand};

/// One classification rule
pub struct Rule<T> {
    pub name: &'static str,
    pub matches: fn(&ParsedCommand) -> bool,
    pub build: fn(&ParsedCommand) -> T,
}

impl<T> Rule<T> {
    pub fn new(
        name: &'static str,
        matches: fn(&ParsedCommand) -> bool,
        build: fn(&ParsedCommand) -> T,
    ) -> Self {
        Self { name, matches, build }
    }
}

/// Ordered first-match-wins dispatcher
pub struct CommandDispatcher<T> {
    parser: MessageParser,
    rules: Vec<Rule<T>>,
    fallback: fn(&ParsedCommand) -> T,
}

impl<T> CommandDispatcher<T> {
    pub fn new(fallback: fn(&ParsedCommand) -> T) -> Self {
        Self {
            parser: MessageParser::new(),
            rules: Vec::new(),
            fallback,
        }
    }

    /// Append a rule after all existing ones
    pub fn rule(
        mut self,
        name: &'static str,
        matches: fn(&ParsedCommand) -> bool,
        build: fn(&ParsedCommand) -> T,
    ) -> Self {
        self.rules.push(Rule::new(name, matches, build));
        self
    }

    /// Rule names in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    /// Classify raw text, returning the matching rule name (if any) and its value
    pub fn dispatch(&self, text: &str) -> (Option<&'static str>, T) {
        let parsed = self.parser.parse(text);
        for rule in &self.rules {
            if (rule.matches)(&parsed) {
                tracing::debug!("Rule {} matched {:?}", rule.name, parsed.text);
                return (Some(rule.name), (rule.build)(&parsed));
            }
        }
        (None, (self.fallback)(&parsed))
    }
}
