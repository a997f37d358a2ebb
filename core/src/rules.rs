//! Ordered pattern rules that map free text onto a single tool call.
//!
//! Rules are checked top to bottom and the first match wins:
//!
//! 1. `echo <rest>` (case-insensitive prefix) → [`ToolCall::Echo`]
//! 2. two or more integers anywhere → [`ToolCall::Add`] with the first two
//! 3. a `cust<digits>` token → [`ToolCall::CustomerLookup`]
//! 4. a `vin<digits>` token → [`ToolCall::VehicleInfo`]
//! 5. anything else → [`ToolCall::Uppercase`]
//!
//! Blank input never reaches the rules; [`RuleSet::classify`] reports it as
//! [`Decision::Empty`].

use regex::Regex;
use thiserror::Error;

use crate::tool::ToolCall;

const ECHO_PREFIX: &str = "echo ";

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid rule pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("integer '{token}' does not fit in 64 bits")]
    IntegerOutOfRange { token: String },
}

/// Outcome of classifying one piece of input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Nothing left after trimming. No tool is called.
    Empty,
    Call(ToolCall),
}

type Matcher = fn(&RuleSet, &str) -> Result<Option<ToolCall>, RuleError>;

struct Rule {
    name: &'static str,
    matcher: Matcher,
}

// Uppercase is not listed: it is the fallback when none of these match.
const RULES: &[Rule] = &[
    Rule { name: "echo", matcher: RuleSet::match_echo },
    Rule { name: "add", matcher: RuleSet::match_add },
    Rule { name: "customer_lookup", matcher: RuleSet::match_customer },
    Rule { name: "vehicle_info", matcher: RuleSet::match_vehicle },
];

/// Compiled patterns for the rule chain.
pub struct RuleSet {
    integer: Regex,
    customer: Regex,
    vehicle: Regex,
}

impl RuleSet {
    pub fn new() -> Result<Self, RuleError> {
        Ok(Self {
            // Optionally signed, ASCII digits only
            integer: Regex::new(r"-?[0-9]+")?,
            // Matched against lowercased text
            customer: Regex::new(r"cust[0-9]+")?,
            vehicle: Regex::new(r"vin[0-9]+")?,
        })
    }

    /// Trims `text` and picks exactly one outcome.
    ///
    /// Fails only when the add rule fires on an integer that does not fit in `i64`.
    pub fn classify(&self, text: &str) -> Result<Decision, RuleError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Decision::Empty);
        }

        for rule in RULES {
            if let Some(call) = (rule.matcher)(self, text)? {
                tracing::debug!(rule = rule.name, "rule matched");
                return Ok(Decision::Call(call));
            }
        }

        tracing::debug!(rule = "uppercase", "no rule matched, using fallback");
        Ok(Decision::Call(ToolCall::Uppercase { text: text.to_string() }))
    }

    fn match_echo(&self, text: &str) -> Result<Option<ToolCall>, RuleError> {
        let Some(prefix) = text.get(..ECHO_PREFIX.len()) else {
            return Ok(None);
        };
        if !prefix.eq_ignore_ascii_case(ECHO_PREFIX) {
            return Ok(None);
        }
        Ok(Some(ToolCall::Echo {
            text: text[ECHO_PREFIX.len()..].to_string(),
        }))
    }

    // The first two hits in order, never later ones.
    fn match_add(&self, text: &str) -> Result<Option<ToolCall>, RuleError> {
        let mut hits = self.integer.find_iter(text).map(|m| m.as_str());
        let (Some(a), Some(b)) = (hits.next(), hits.next()) else {
            return Ok(None);
        };
        Ok(Some(ToolCall::Add {
            a: parse_integer(a)?,
            b: parse_integer(b)?,
        }))
    }

    fn match_customer(&self, text: &str) -> Result<Option<ToolCall>, RuleError> {
        Ok(find_token(&self.customer, text).map(|customer_id| ToolCall::CustomerLookup { customer_id }))
    }

    fn match_vehicle(&self, text: &str) -> Result<Option<ToolCall>, RuleError> {
        Ok(find_token(&self.vehicle, text).map(|vin| ToolCall::VehicleInfo { vin }))
    }
}

fn parse_integer(token: &str) -> Result<i64, RuleError> {
    token.parse::<i64>().map_err(|_| RuleError::IntegerOutOfRange {
        token: token.to_string(),
    })
}

// Finds the first hit in the lowercased text and returns it uppercased.
fn find_token(pattern: &Regex, text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    pattern
        .find(&lowered)
        .map(|m| m.as_str().to_ascii_uppercase())
}
